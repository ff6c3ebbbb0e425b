use crate::features::auth::handler;
use axum::{routing::get, Router};

/// Protected auth routes (require JWT authentication)
pub fn protected_routes() -> Router {
    Router::new().route("/auth/me", get(handler::get_me))
}
