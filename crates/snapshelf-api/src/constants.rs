//! API constants

/// Versioned prefix for every JSON endpoint
pub const API_PREFIX: &str = "/api/v1";

/// Where the OpenAPI document is served
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Bytes allowed on top of the file limit for multipart boundaries and part headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
