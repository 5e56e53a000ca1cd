//! Shared constants

/// Default upload limit in megabytes (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

/// Container used when `AZURE_STORAGE_CONTAINER` is not set.
pub const DEFAULT_CONTAINER: &str = "uploads";

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Name used when sanitizing leaves nothing behind.
pub const FALLBACK_FILENAME: &str = "upload";

/// `strftime` layout of the timestamp prefix on stored object names.
pub const OBJECT_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";
