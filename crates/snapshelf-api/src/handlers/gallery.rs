use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use snapshelf_storage::list_gallery;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct GalleryResponse {
    pub ok: bool,
    /// Object URLs, newest name first
    pub gallery: Vec<String>,
}

/// List every uploaded object as a URL
#[utoipa::path(
    get,
    path = "/api/v1/gallery",
    tag = "gallery",
    responses(
        (status = 200, description = "Gallery listing", body = GalleryResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_gallery"))]
pub async fn get_gallery(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GalleryResponse>, HttpAppError> {
    let gallery = list_gallery(state.store.as_ref()).await?;
    tracing::debug!(count = gallery.len(), "Gallery listed");

    Ok(Json(GalleryResponse { ok: true, gallery }))
}
