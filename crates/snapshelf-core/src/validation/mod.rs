//! Upload validation
//!
//! Checks run in a fixed order and stop at the first failure:
//! presence, filename, content type, size.

use crate::constants::DEFAULT_MAX_FILE_SIZE_MB;
use crate::error::AppError;
use crate::models::UploadRequest;

/// Validates client uploads against the configured size limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadValidator {
    max_bytes: u64,
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024)
    }
}

impl UploadValidator {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Run every check on a fully buffered upload.
    ///
    /// The size check uses the actual content length, not `byte_size`.
    pub fn validate(&self, request: Option<UploadRequest>) -> Result<UploadRequest, AppError> {
        let request = request.ok_or(AppError::MissingFile)?;
        self.check_headers(&request.raw_filename, &request.declared_mime_type)?;
        self.check_size(request.content.len() as u64)?;
        Ok(request)
    }

    /// Filename and content-type checks, usable before the body is read.
    pub fn check_headers(&self, raw_filename: &str, declared_mime_type: &str) -> Result<(), AppError> {
        if raw_filename.is_empty() {
            return Err(AppError::EmptyFilename);
        }

        if !is_image_mime(declared_mime_type) {
            return Err(AppError::UnsupportedType(declared_mime_type.to_string()));
        }

        Ok(())
    }

    /// Size check; called with a running total while streaming.
    pub fn check_size(&self, byte_size: u64) -> Result<(), AppError> {
        if byte_size > self.max_bytes {
            return Err(AppError::TooLarge {
                max_bytes: self.max_bytes,
            });
        }
        Ok(())
    }
}

fn is_image_mime(mime: &str) -> bool {
    const PREFIX: &str = "image/";
    mime.get(..PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    const TEN_MIB: usize = 10 * 1024 * 1024;

    fn request(name: &str, mime: &str, len: usize) -> UploadRequest {
        UploadRequest::new(name, mime, Bytes::from(vec![0u8; len]))
    }

    #[test]
    fn accepts_empty_image() {
        let validator = UploadValidator::default();
        let req = validator.validate(Some(request("a.png", "image/png", 0))).unwrap();
        assert_eq!(req.raw_filename, "a.png");
        assert_eq!(req.byte_size, 0);
    }

    #[test]
    fn missing_part_is_reported_first() {
        let err = UploadValidator::default().validate(None).unwrap_err();
        assert!(matches!(err, AppError::MissingFile));
    }

    #[test]
    fn empty_filename_wins_over_bad_type() {
        let err = UploadValidator::default()
            .validate(Some(request("", "text/plain", 1)))
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyFilename));
    }

    #[test]
    fn rejects_non_image_types() {
        let err = UploadValidator::default()
            .validate(Some(request("notes.txt", "text/plain", 4)))
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedType(ref t) if t == "text/plain"));
    }

    #[test]
    fn mime_prefix_is_case_insensitive() {
        let validator = UploadValidator::default();
        assert!(validator.check_headers("a.JPG", "IMAGE/JPEG").is_ok());
        assert!(validator.check_headers("a", "Image/webp").is_ok());
        assert!(validator.check_headers("a", "image").is_err());
        assert!(validator.check_headers("a", "").is_err());
        assert!(validator.check_headers("a", "imagé/png").is_err());
    }

    #[test]
    fn type_is_checked_before_size() {
        let err = UploadValidator::new(1)
            .validate(Some(request("big.txt", "text/plain", 2)))
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedType(_)));
    }

    #[test]
    fn size_limit_is_inclusive() {
        let validator = UploadValidator::default();
        assert!(validator
            .validate(Some(request("a.png", "image/png", TEN_MIB)))
            .is_ok());

        let err = validator
            .validate(Some(request("a.png", "image/png", TEN_MIB + 1)))
            .unwrap_err();
        assert!(matches!(err, AppError::TooLarge { max_bytes } if max_bytes == TEN_MIB as u64));
    }
}
