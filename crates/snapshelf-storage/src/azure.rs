use crate::backend;
use crate::container::ContainerClient;
use crate::credentials::{AzureAuth, AzureCredentials};
use crate::traits::{ObjectStore, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::azure::{MicrosoftAzure, MicrosoftAzureBuilder};
use snapshelf_core::models::{ObjectEntry, StoredObject};

/// Azure Blob Storage implementation bound to one container
#[derive(Debug)]
pub struct AzureBlobStore {
    store: MicrosoftAzure,
    rest: ContainerClient,
    container: String,
    base_url: String,
}

impl AzureBlobStore {
    /// Create a new AzureBlobStore instance
    ///
    /// # Arguments
    /// * `credentials` - Resolved account, endpoint and auth mode
    /// * `container` - Container every operation is scoped to
    pub fn new(credentials: AzureCredentials, container: String) -> StorageResult<Self> {
        let mut builder = MicrosoftAzureBuilder::new()
            .with_account(credentials.account.clone())
            .with_container_name(container.clone());

        if credentials.emulator {
            builder = builder.with_use_emulator(true);
        } else {
            builder = builder
                .with_endpoint(credentials.account_url.clone())
                .with_allow_http(credentials.allow_http());

            builder = match &credentials.auth {
                AzureAuth::AccessKey(key) => builder.with_access_key(key.clone()),
                AzureAuth::Sas(token) => {
                    builder.with_sas_authorization(AzureAuth::sas_pairs(token))
                }
                AzureAuth::Anonymous => builder.with_skip_signature(true),
            };
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        let base_url = credentials.container_url(&container);
        let rest = ContainerClient::new(credentials, container.clone())?;

        Ok(AzureBlobStore {
            store,
            rest,
            container,
            base_url,
        })
    }
}

#[async_trait]
impl ObjectStore for AzureBlobStore {
    async fn ensure_container(&self) -> StorageResult<()> {
        let status = self.rest.ensure().await?;
        tracing::debug!(container = %self.container, status = ?status, "Container ready");
        Ok(())
    }

    async fn put_object(
        &self,
        name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> StorageResult<StoredObject> {
        let size = bytes.len() as u64;
        let start = std::time::Instant::now();

        backend::put_with_content_type(&self.store, name, bytes, content_type)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    container = %self.container,
                    key = %name,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Azure upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            container = %self.container,
            key = %name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Azure upload successful"
        );

        Ok(StoredObject {
            name: name.to_string(),
            url: self.object_url(name),
            content_type: content_type.to_string(),
        })
    }

    async fn list_objects(&self) -> StorageResult<Vec<ObjectEntry>> {
        let start = std::time::Instant::now();

        let entries = backend::list_entries(&self.store, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    container = %self.container,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Azure listing failed"
                );
                StorageError::ListFailed(e.to_string())
            })?;

        tracing::debug!(
            container = %self.container,
            count = entries.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Azure listing successful"
        );

        Ok(entries)
    }

    /// Single-result List Blobs; `object_store` listings always fetch a full
    /// service page.
    async fn list_first(&self) -> StorageResult<Option<ObjectEntry>> {
        self.rest.first_blob().await
    }

    fn container_base_url(&self) -> &str {
        &self.base_url
    }

    fn container_name(&self) -> &str {
        &self.container
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Azure
    }
}
