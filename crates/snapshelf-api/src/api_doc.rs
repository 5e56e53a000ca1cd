//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use snapshelf_core::models;

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Snapshelf API",
        version = "0.1.0",
        description = "Upload images into a blob container and list them as a gallery. All JSON endpoints live under /api/v1/."
    ),
    paths(
        handlers::health::health_check,
        handlers::gallery::get_gallery,
        handlers::upload::upload_file,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::gallery::GalleryResponse,
        handlers::health::HealthResponse,
        handlers::upload::UploadResponse,
        models::UploadReceipt,
    )),
    tags(
        (name = "health", description = "Storage reachability"),
        (name = "gallery", description = "Listing of uploaded images"),
        (name = "upload", description = "Image uploads"),
    )
)]
pub struct ApiDoc;
