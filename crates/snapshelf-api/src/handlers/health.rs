use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use snapshelf_core::models::HealthReport;
use snapshelf_storage::probe;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        match report {
            HealthReport::Healthy => Self {
                status: "healthy",
                error: None,
            },
            HealthReport::Unhealthy { error } => Self {
                status: "unhealthy",
                error: Some(error),
            },
        }
    }
}

/// Storage reachability check
///
/// Returns 200 `{"status":"healthy"}` when one listing entry can be fetched
/// (an empty container counts), otherwise 500 with the store's error message.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Storage reachable", body = HealthResponse),
        (status = 500, description = "Storage unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let report = probe(state.store.as_ref()).await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(report.into()))
}
