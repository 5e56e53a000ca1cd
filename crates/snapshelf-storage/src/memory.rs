use crate::backend;
use crate::traits::{ObjectStore, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use snapshelf_core::models::{ObjectEntry, StoredObject};

/// In-process store for local development and tests.
///
/// Contents live as long as the value and are never persisted. URLs are
/// formed from a configured base URL; nothing serves them.
#[derive(Debug)]
pub struct MemoryStore {
    store: InMemory,
    container: String,
    base_url: String,
}

impl MemoryStore {
    pub fn new(container: impl Into<String>, base_url: impl AsRef<str>) -> Self {
        Self {
            store: InMemory::new(),
            container: container.into(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    /// Stored bytes of `name`, if present.
    pub async fn read(&self, name: &str) -> StorageResult<Option<Bytes>> {
        match backend::read_bytes(&self.store, name).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn ensure_container(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn put_object(
        &self,
        name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> StorageResult<StoredObject> {
        let size = bytes.len() as u64;

        backend::put_with_content_type(&self.store, name, bytes, content_type)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        tracing::debug!(
            container = %self.container,
            key = %name,
            size_bytes = size,
            "Memory upload successful"
        );

        Ok(StoredObject {
            name: name.to_string(),
            url: self.object_url(name),
            content_type: content_type.to_string(),
        })
    }

    async fn list_objects(&self) -> StorageResult<Vec<ObjectEntry>> {
        backend::list_entries(&self.store, None)
            .await
            .map_err(|e| StorageError::ListFailed(e.to_string()))
    }

    async fn list_first(&self) -> StorageResult<Option<ObjectEntry>> {
        backend::list_entries(&self.store, Some(1))
            .await
            .map(|entries| entries.into_iter().next())
            .map_err(|e| StorageError::ListFailed(e.to_string()))
    }

    fn container_base_url(&self) -> &str {
        &self.base_url
    }

    fn container_name(&self) -> &str {
        &self.container
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
