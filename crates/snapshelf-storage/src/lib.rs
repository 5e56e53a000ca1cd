//! Snapshelf Storage Library
//!
//! This crate provides the [`ObjectStore`] contract used by the HTTP layer and
//! its two implementations: Azure Blob Storage and an in-process memory store.
//! Both are built on the `object_store` crate. It also hosts the two read-side
//! operations that only need the contract: the gallery listing and the health
//! probe.
//!
//! # Object URLs
//!
//! Every store exposes a container base URL. The public URL of an object is
//! always `{container_base_url}/{name}`; names are already restricted to
//! `[A-Za-z0-9._-]` so no escaping is applied.

pub mod azure;
mod backend;
pub mod container;
pub mod credentials;
pub mod factory;
pub mod gallery;
pub mod health;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use azure::AzureBlobStore;
pub use container::{ContainerClient, ContainerStatus};
pub use credentials::{AzureAuth, AzureCredentials};
pub use factory::create_storage;
pub use gallery::list_gallery;
pub use health::probe;
pub use memory::MemoryStore;
pub use snapshelf_core::StorageBackend;
pub use traits::{ObjectStore, StorageError, StorageResult};
