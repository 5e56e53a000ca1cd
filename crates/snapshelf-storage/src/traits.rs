//! Object store abstraction trait
//!
//! This module defines the `ObjectStore` trait that every storage backend
//! implements. Handlers only ever hold an `Arc<dyn ObjectStore>`.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use snapshelf_core::models::{ObjectEntry, StoredObject};
use snapshelf_core::AppError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Listing failed: {0}")]
    ListFailed(String),

    #[error("Container provisioning failed: {0}")]
    ContainerFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(msg) => AppError::Configuration(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Blob container contract.
///
/// A store is bound to exactly one container. Writes overwrite silently;
/// listings are unordered and unpaginated.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Make sure the bound container exists. Idempotent.
    async fn ensure_container(&self) -> StorageResult<()>;

    /// Write `bytes` under `name`, replacing any existing object.
    async fn put_object(
        &self,
        name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> StorageResult<StoredObject>;

    /// Every object in the container.
    async fn list_objects(&self) -> StorageResult<Vec<ObjectEntry>>;

    /// At most one entry; used for reachability checks.
    async fn list_first(&self) -> StorageResult<Option<ObjectEntry>>;

    /// Public URL of the container, without a trailing slash.
    fn container_base_url(&self) -> &str;

    fn container_name(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;

    /// Public URL of the object called `name`.
    fn object_url(&self, name: &str) -> String {
        format!("{}/{}", self.container_base_url(), name)
    }
}
