//! Route configuration and setup

use crate::constants::{API_PREFIX, OPENAPI_PATH};
use crate::handlers;
use crate::middleware::request_id_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use snapshelf_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let body_limit = state.max_request_bytes();

    tracing::info!(
        http_concurrency_limit = config.http_concurrency_limit,
        body_limit_bytes = body_limit,
        "HTTP limits configured"
    );

    let api_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/gallery", get(handlers::gallery::get_gallery))
        .route(
            "/upload",
            post(handlers::upload::upload_file).layer(DefaultBodyLimit::max(body_limit)),
        );

    let app = Router::new()
        .route("/", get(handlers::index::index))
        .nest(API_PREFIX, api_routes)
        .route(
            OPENAPI_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_PATH).path("/docs"))
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|_| anyhow::anyhow!("Invalid CORS origin '{}'", o))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
