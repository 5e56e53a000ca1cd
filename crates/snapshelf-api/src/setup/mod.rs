//! Application setup and initialization
//!
//! Everything `main` needs before serving: config validation, telemetry,
//! the object store and the router.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use snapshelf_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first so validation warnings are visible
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Validate configuration - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment,
        backend = %config.storage_backend,
        container = %config.container,
        "Configuration loaded and validated successfully"
    );

    // Setup storage
    let store = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(config.clone(), store));

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
