use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::BytesMut;
use chrono::Utc;
use serde::Serialize;
use snapshelf_core::constants::UPLOAD_FIELD;
use snapshelf_core::models::{UploadReceipt, UploadRequest};
use snapshelf_core::{object_name, sanitize_filename, AppError, UploadValidator};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub receipt: UploadReceipt,
}

/// Upload an image
///
/// Accepts one multipart part named `file`. The filename and content type are
/// checked before the body is read; the size is checked while it streams.
/// The object is stored as `{YYYYMMDDTHHMMSS}-{sanitized filename}`.
///
/// # Errors
/// - `AppError::MissingFile` - No `file` part
/// - `AppError::EmptyFilename` - Part has no filename
/// - `AppError::UnsupportedType` - Declared type is not `image/*`
/// - `AppError::TooLarge` - Content exceeds the configured limit
/// - `AppError::Storage` - The store rejected the write
#[utoipa::path(
    post,
    path = "/api/v1/upload",
    tag = "upload",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image uploaded successfully", body = UploadResponse),
        (status = 400, description = "Missing file or empty filename", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Not an image", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart, &state.validator).await?,
        Err(rejection) => {
            tracing::debug!(rejection = %rejection, "Request is not multipart");
            None
        }
    };

    let request = state.validator.validate(upload)?;

    let sanitized = sanitize_filename(&request.raw_filename);
    let name = object_name(&sanitized, Utc::now());
    let size_bytes = request.byte_size;

    let stored = state
        .store
        .put_object(&name, request.content, &request.declared_mime_type)
        .await?;

    tracing::info!(
        key = %stored.name,
        raw_filename = %request.raw_filename,
        content_type = %stored.content_type,
        size_bytes,
        "File uploaded"
    );

    let receipt = UploadReceipt::new(stored, state.store.container_name(), size_bytes);
    Ok(Json(UploadResponse { ok: true, receipt }))
}

/// Pull the `file` part out of the form, validating as it goes.
///
/// Returns `None` when no `file` part exists. Other fields, including text
/// fields named `file`, are skipped.
async fn read_upload(
    mut multipart: Multipart,
    validator: &UploadValidator,
) -> Result<Option<UploadRequest>, AppError> {
    let mut upload: Option<UploadRequest> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, validator))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // A `file` field without a `filename` parameter is plain text, not a file part
        let Some(raw_filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        if upload.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        validator.check_headers(&raw_filename, &content_type)?;

        let mut content = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, validator))?
        {
            validator.check_size((content.len() + chunk.len()) as u64)?;
            content.extend_from_slice(&chunk);
        }

        upload = Some(UploadRequest::new(
            raw_filename,
            content_type,
            content.freeze(),
        ));
    }

    Ok(upload)
}

fn multipart_error(err: MultipartError, validator: &UploadValidator) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::TooLarge {
            max_bytes: validator.max_bytes(),
        }
    } else {
        AppError::InvalidInput(format!("Failed to read multipart body: {}", err.body_text()))
    }
}
