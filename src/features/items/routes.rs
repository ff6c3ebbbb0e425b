use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::items::handlers;
use crate::features::items::services::ItemService;

/// Item routes (require JWT authentication)
pub fn routes(service: Arc<ItemService>) -> Router {
    Router::new()
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/items/{item_id}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route(
            "/items/{item_id}/tag/{tag_id}",
            put(handlers::add_item_tag).delete(handlers::remove_item_tag),
        )
        .with_state(service)
}
