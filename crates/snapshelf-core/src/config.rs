//! Configuration module
//!
//! Configuration is sourced from the environment (and an optional `.env` file)
//! once at process start. The credential variables are resolved into a single
//! [`CredentialSource`] so the rest of the service never branches on them.

use std::env;
use std::fmt;

use crate::constants::{DEFAULT_CONTAINER, DEFAULT_MAX_FILE_SIZE_MB};
use crate::error::AppError;
use crate::storage_types::StorageBackend;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const DEFAULT_MEMORY_BASE_URL: &str = "http://localhost:8000/uploads";

/// How the object store authenticates against the storage account.
///
/// Resolved in priority order: a connection string wins over an account URL;
/// an account URL with a SAS token uses the token, otherwise access is anonymous.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Full Azure connection string (`AccountName=...;AccountKey=...;...`)
    ConnectionString(String),
    /// Account endpoint URL, with an optional shared-access-signature token
    AccountUrl {
        url: String,
        sas_token: Option<String>,
    },
}

impl CredentialSource {
    /// Short label for logs; never includes secret material
    pub fn kind(&self) -> &'static str {
        match self {
            CredentialSource::ConnectionString(_) => "connection_string",
            CredentialSource::AccountUrl {
                sas_token: Some(_), ..
            } => "account_url_sas",
            CredentialSource::AccountUrl { sas_token: None, .. } => "account_url_anonymous",
        }
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::ConnectionString(_) => {
                f.debug_tuple("ConnectionString").field(&"<redacted>").finish()
            }
            CredentialSource::AccountUrl { url, sas_token } => f
                .debug_struct("AccountUrl")
                .field("url", url)
                .field("sas_token", &sas_token.as_ref().map(|_| "<redacted>"))
                .finish(),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub storage_backend: StorageBackend,
    pub credentials: Option<CredentialSource>,
    pub container: String,
    pub max_file_size_bytes: u64,
    pub memory_base_url: String,
    pub http_concurrency_limit: usize,
}

impl Config {
    /// Load configuration from the process environment (after reading `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| AppError::Configuration("PORT must be a valid number".to_string()))?,
            None => DEFAULT_PORT,
        };

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(raw) => raw
                .parse::<StorageBackend>()
                .map_err(|e| AppError::Configuration(e.to_string()))?,
            None => StorageBackend::Azure,
        };

        let max_file_size_mb = match var("MAX_FILE_SIZE_MB") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Configuration("MAX_FILE_SIZE_MB must be a whole number".to_string())
            })?,
            None => DEFAULT_MAX_FILE_SIZE_MB,
        };
        let max_file_size_bytes = max_file_size_mb.checked_mul(1024 * 1024).ok_or_else(|| {
            AppError::Configuration(format!(
                "MAX_FILE_SIZE_MB is too large ({} MiB does not fit in a byte count)",
                max_file_size_mb
            ))
        })?;

        let credentials = resolve_credentials(&var);
        if storage_backend == StorageBackend::Azure && credentials.is_none() {
            return Err(AppError::Configuration(
                "Set AZURE_STORAGE_CONNECTION_STRING or AZURE_STORAGE_ACCOUNT_URL \
                 (optionally with AZURE_STORAGE_SAS_TOKEN)"
                    .to_string(),
            ));
        }

        Ok(Config {
            server_port,
            environment,
            cors_origins,
            storage_backend,
            credentials,
            container: var("AZURE_STORAGE_CONTAINER")
                .map(|c| c.trim().to_string())
                .unwrap_or_else(|| DEFAULT_CONTAINER.to_string()),
            max_file_size_bytes,
            memory_base_url: var("MEMORY_STORAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_MEMORY_BASE_URL.to_string()),
            http_concurrency_limit: var("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .unwrap_or(DEFAULT_HTTP_CONCURRENCY_LIMIT)
                .max(1),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        matches!(
            self.environment.to_lowercase().as_str(),
            "production" | "prod"
        )
    }

    /// Reject values that would only fail later, per request.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_file_size_bytes == 0 {
            return Err(AppError::Configuration(
                "MAX_FILE_SIZE_MB cannot be 0".to_string(),
            ));
        }

        if !valid_container_name(&self.container) {
            return Err(AppError::Configuration(format!(
                "Invalid container name '{}': use 3-63 lowercase letters, digits, or single hyphens",
                self.container
            )));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(AppError::Configuration(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
                    .to_string(),
            ));
        }

        Ok(())
    }
}

fn resolve_credentials<F>(var: &F) -> Option<CredentialSource>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(conn) = var("AZURE_STORAGE_CONNECTION_STRING") {
        return Some(CredentialSource::ConnectionString(conn.trim().to_string()));
    }

    var("AZURE_STORAGE_ACCOUNT_URL").map(|url| CredentialSource::AccountUrl {
        url: url.trim().trim_end_matches('/').to_string(),
        sas_token: var("AZURE_STORAGE_SAS_TOKEN")
            .map(|t| t.trim().trim_start_matches('?').to_string()),
    })
}

/// Azure container naming rules.
fn valid_container_name(name: &str) -> bool {
    let len_ok = (3..=63).contains(&name.len());
    let chars_ok = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    len_ok
        && chars_ok
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
}
