use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::collections::handlers;
use crate::features::collections::services::CollectionService;

/// Collection routes (require JWT authentication)
pub fn routes(service: Arc<CollectionService>) -> Router {
    Router::new()
        .route(
            "/collections",
            get(handlers::list_collections).post(handlers::create_collection),
        )
        .route(
            "/collections/{collection_id}",
            get(handlers::get_collection)
                .put(handlers::update_collection)
                .delete(handlers::delete_collection),
        )
        .with_state(service)
}
