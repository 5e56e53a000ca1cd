//! Store double that fails every call, for the storage-error paths.

use async_trait::async_trait;
use bytes::Bytes;
use snapshelf_core::models::{ObjectEntry, StoredObject};
use snapshelf_storage::{ObjectStore, StorageBackend, StorageError, StorageResult};

pub const FAILURE: &str = "AuthenticationFailed: Server failed to authenticate the request";

pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn ensure_container(&self) -> StorageResult<()> {
        Err(StorageError::ContainerFailed(FAILURE.to_string()))
    }

    async fn put_object(&self, _: &str, _: Bytes, _: &str) -> StorageResult<StoredObject> {
        Err(StorageError::UploadFailed(FAILURE.to_string()))
    }

    async fn list_objects(&self) -> StorageResult<Vec<ObjectEntry>> {
        Err(StorageError::ListFailed(FAILURE.to_string()))
    }

    async fn list_first(&self) -> StorageResult<Option<ObjectEntry>> {
        Err(StorageError::ListFailed(FAILURE.to_string()))
    }

    fn container_base_url(&self) -> &str {
        "https://unreachable.blob.core.windows.net/uploads"
    }

    fn container_name(&self) -> &str {
        "uploads"
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Azure
    }
}
