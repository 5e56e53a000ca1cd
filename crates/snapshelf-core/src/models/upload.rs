use bytes::Bytes;
use serde::Serialize;
use utoipa::ToSchema;

/// A client-supplied file, held only for the duration of one request.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Filename exactly as the client sent it; untrusted
    pub raw_filename: String,
    /// Client-declared content type; untrusted
    pub declared_mime_type: String,
    /// Length of `content` in bytes
    pub byte_size: u64,
    pub content: Bytes,
}

impl UploadRequest {
    pub fn new(
        raw_filename: impl Into<String>,
        declared_mime_type: impl Into<String>,
        content: Bytes,
    ) -> Self {
        Self {
            raw_filename: raw_filename.into(),
            declared_mime_type: declared_mime_type.into(),
            byte_size: content.len() as u64,
            content,
        }
    }
}

/// An object as written to the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StoredObject {
    /// Stored object name, `{YYYYMMDDTHHMMSS}-{sanitized filename}`
    pub name: String,
    /// Public URL of the object
    pub url: String,
    pub content_type: String,
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UploadReceipt {
    pub url: String,
    /// Stored object name
    #[serde(rename = "filename")]
    pub name: String,
    pub container: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl UploadReceipt {
    pub fn new(object: StoredObject, container: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            url: object.url,
            name: object.name,
            container: container.into(),
            content_type: object.content_type,
            size_bytes,
        }
    }
}
