//! Snapshelf Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! pure upload rules (filename sanitizing, object naming, upload validation)
//! shared by the storage and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod naming;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, CredentialSource};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use naming::{object_name, sanitize_filename};
pub use storage_types::StorageBackend;
pub use validation::UploadValidator;
