use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::tags::handlers;
use crate::features::tags::services::TagService;

/// Tag routes (require JWT authentication)
pub fn routes(service: Arc<TagService>) -> Router {
    Router::new()
        .route("/tags", get(handlers::list_tags).post(handlers::create_tag))
        .route(
            "/tags/{tag_id}",
            get(handlers::get_tag)
                .put(handlers::update_tag)
                .delete(handlers::delete_tag),
        )
        .with_state(service)
}
