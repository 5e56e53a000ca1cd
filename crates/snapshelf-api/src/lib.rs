//! Snapshelf API Library
//!
//! This crate provides the HTTP handlers, middleware, and application setup
//! for the image upload service.

mod api_doc;
mod middleware;
mod telemetry;

pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
