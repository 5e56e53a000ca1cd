//! Data models for the application
//!
//! Upload-side types live in `upload`, store-side listing types in `object`,
//! and the liveness result in `health`.

mod health;
mod object;
mod upload;

pub use health::*;
pub use object::*;
pub use upload::*;
