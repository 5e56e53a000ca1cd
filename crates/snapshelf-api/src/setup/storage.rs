//! Storage setup and initialization

use anyhow::{Context, Result};
use snapshelf_core::Config;
use snapshelf_storage::{create_storage, ObjectStore};
use std::sync::Arc;

/// Build the configured store and make sure its container exists.
///
/// A failed container check is logged, not fatal: the health endpoint
/// reports reachability from then on.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn ObjectStore>> {
    tracing::info!("Initializing storage...");
    let store = create_storage(config).context("Failed to create storage backend")?;

    match store.ensure_container().await {
        Ok(()) => tracing::info!(
            backend = %store.backend_type(),
            container = %store.container_name(),
            base_url = %store.container_base_url(),
            "Storage initialized successfully"
        ),
        Err(e) => tracing::warn!(
            error = %e,
            backend = %store.backend_type(),
            container = %store.container_name(),
            "Could not ensure container exists; continuing"
        ),
    }

    Ok(store)
}
