use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::stacks::handlers;
use crate::features::stacks::services::StackService;

/// Stack routes (require JWT authentication)
pub fn routes(service: Arc<StackService>) -> Router {
    Router::new()
        .route(
            "/stacks",
            get(handlers::list_stacks).post(handlers::create_stack),
        )
        .route(
            "/stacks/{stack_id}",
            get(handlers::get_stack)
                .put(handlers::update_stack)
                .delete(handlers::delete_stack),
        )
        .with_state(service)
}
