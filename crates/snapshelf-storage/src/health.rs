//! Storage health probe

use crate::traits::ObjectStore;
use snapshelf_core::models::HealthReport;

/// Shallow reachability check: fetch at most one listing entry.
///
/// An empty container is healthy. Object contents are never read.
pub async fn probe(store: &dyn ObjectStore) -> HealthReport {
    let start = std::time::Instant::now();

    match store.list_first().await {
        Ok(_) => {
            tracing::debug!(
                container = %store.container_name(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Storage health check passed"
            );
            HealthReport::Healthy
        }
        Err(e) => {
            let mut error = e.to_string();
            if error.trim().is_empty() {
                error = "storage unreachable".to_string();
            }
            tracing::warn!(
                container = %store.container_name(),
                error = %error,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Storage health check failed"
            );
            HealthReport::Unhealthy { error }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{StorageError, StorageResult};
    use crate::{MemoryStore, StorageBackend};
    use async_trait::async_trait;
    use bytes::Bytes;
    use snapshelf_core::models::{ObjectEntry, StoredObject};

    struct UnreachableStore;

    #[async_trait]
    impl ObjectStore for UnreachableStore {
        async fn ensure_container(&self) -> StorageResult<()> {
            Err(StorageError::ContainerFailed("connection refused".into()))
        }

        async fn put_object(&self, _: &str, _: Bytes, _: &str) -> StorageResult<StoredObject> {
            Err(StorageError::UploadFailed("connection refused".into()))
        }

        async fn list_objects(&self) -> StorageResult<Vec<ObjectEntry>> {
            Err(StorageError::ListFailed("connection refused".into()))
        }

        async fn list_first(&self) -> StorageResult<Option<ObjectEntry>> {
            Err(StorageError::ListFailed("connection refused".into()))
        }

        fn container_base_url(&self) -> &str {
            "http://unreachable/uploads"
        }

        fn container_name(&self) -> &str {
            "uploads"
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Azure
        }
    }

    #[tokio::test]
    async fn empty_container_is_healthy() {
        let store = MemoryStore::new("uploads", "http://localhost/uploads");
        assert_eq!(probe(&store).await, HealthReport::Healthy);
    }

    #[tokio::test]
    async fn list_failure_is_unhealthy_with_message() {
        match probe(&UnreachableStore).await {
            HealthReport::Unhealthy { error } => {
                assert!(!error.is_empty());
                assert!(error.contains("connection refused"));
            }
            HealthReport::Healthy => panic!("expected unhealthy"),
        }
    }
}
