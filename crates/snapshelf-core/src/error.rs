//! Error types module
//!
//! All failures surfaced by the service are unified under [`AppError`]. Each
//! variant self-describes its HTTP presentation through [`ErrorMetadata`], so the
//! HTTP layer performs a single mapping from error kind to status code.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No file part named 'file' in the request")]
    MissingFile,

    #[error("Uploaded file has an empty filename")]
    EmptyFilename,

    #[error("Unsupported content type '{0}': only image/* uploads are accepted")]
    UnsupportedType(String),

    #[error("File exceeds the maximum allowed size of {max_bytes} bytes")]
    TooLarge { max_bytes: u64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Configuration(_) => (
            500,
            "CONFIGURATION_ERROR",
            false,
            Some("Contact the service operator"),
            true,
            LogLevel::Error,
        ),
        AppError::MissingFile => (
            400,
            "MISSING_FILE",
            false,
            Some("Send exactly one multipart field named 'file'"),
            false,
            LogLevel::Debug,
        ),
        AppError::EmptyFilename => (
            400,
            "EMPTY_FILENAME",
            false,
            Some("Choose a file before uploading"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedType(_) => (
            415,
            "UNSUPPORTED_TYPE",
            false,
            Some("Upload an image (image/*) file"),
            false,
            LogLevel::Debug,
        ),
        AppError::TooLarge { .. } => (
            413,
            "TOO_LARGE",
            false,
            Some("Reduce file size and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request format and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Configuration(_) => "Configuration",
            AppError::MissingFile => "MissingFile",
            AppError::EmptyFilename => "EmptyFilename",
            AppError::UnsupportedType(_) => "UnsupportedType",
            AppError::TooLarge { .. } => "TooLarge",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Storage(_) => "Storage",
        }
    }

    /// Whether the caller must correct the request (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status_code())
    }

    /// Variant and fields, for non-production error bodies
    pub fn detailed_message(&self) -> String {
        format!("{:?}", self)
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Configuration(_) => "Service is misconfigured".to_string(),
            // Storage messages are surfaced as-is so operators can see auth/network causes.
            AppError::Storage(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
