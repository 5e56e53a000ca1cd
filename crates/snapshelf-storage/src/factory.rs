use crate::credentials::AzureCredentials;
use crate::{AzureBlobStore, MemoryStore, ObjectStore, StorageBackend, StorageError, StorageResult};
use snapshelf_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn ObjectStore>> {
    match config.storage_backend {
        StorageBackend::Azure => {
            let source = config.credentials.as_ref().ok_or_else(|| {
                StorageError::ConfigError(
                    "Azure backend selected but no credential source is configured".to_string(),
                )
            })?;
            let credentials = AzureCredentials::from_source(source)?;

            tracing::info!(
                account = %credentials.account,
                container = %config.container,
                credential = source.kind(),
                "Using Azure Blob Storage"
            );

            let store = AzureBlobStore::new(credentials, config.container.clone())?;
            Ok(Arc::new(store))
        }

        StorageBackend::Memory => {
            tracing::warn!(
                container = %config.container,
                base_url = %config.memory_base_url,
                "Using in-memory storage; uploads are lost on restart"
            );
            Ok(Arc::new(MemoryStore::new(
                config.container.clone(),
                &config.memory_base_url,
            )))
        }
    }
}
