//! Configuration validation
//!
//! Validates configuration at startup to catch misconfigurations early.

use anyhow::Result;
use snapshelf_core::{Config, CredentialSource, StorageBackend};

/// Validate critical configuration values
///
/// Hard errors come from `Config::validate`; combinations that work but are
/// probably unintended only produce warnings.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
    }

    match (&config.storage_backend, &config.credentials) {
        (StorageBackend::Memory, _) if config.is_production() => {
            tracing::warn!("In-memory storage selected in production - uploads will not persist");
        }
        (StorageBackend::Azure, Some(CredentialSource::AccountUrl { sas_token: None, .. })) => {
            tracing::warn!(
                "No SAS token configured - requests are unsigned and uploads need a container allowing anonymous writes"
            );
        }
        _ => {}
    }

    Ok(())
}
