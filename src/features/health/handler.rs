use axum::{extract::State, http::StatusCode, Json};
use sqlx::PgPool;

use crate::core::database;
use crate::shared::types::StatusDto;

/// Liveness check
#[utoipa::path(
    get,
    path = "/livez",
    responses(
        (status = 200, description = "Process is running", body = StatusDto)
    ),
    tag = "internal"
)]
pub async fn livez() -> Json<StatusDto> {
    Json(StatusDto::ok())
}

/// Readiness check
///
/// Reports ready only while the database answers.
#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Ready to serve traffic", body = StatusDto),
        (status = 503, description = "Database unreachable")
    ),
    tag = "internal"
)]
pub async fn readyz(State(pool): State<PgPool>) -> Result<Json<StatusDto>, StatusCode> {
    database::ping(&pool).await.map_err(|e| {
        tracing::warn!("Readiness check failed: {}", e);
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    Ok(Json(StatusDto::ok()))
}
