use axum::{routing::get, Router};
use sqlx::PgPool;

use crate::features::health::handler;

/// Health routes (no auth required)
pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/livez", get(handler::livez))
        .route("/readyz", get(handler::readyz))
        .with_state(pool)
}
