use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::attachments::handlers;
use crate::features::attachments::services::AttachmentService;

/// Attachment routes (require JWT authentication)
pub fn routes(service: Arc<AttachmentService>, max_upload_size: usize) -> Router {
    Router::new()
        .route(
            "/items/{item_id}/attachments",
            get(handlers::list_attachments),
        )
        .route(
            "/items/{item_id}/attachment",
            post(handlers::upload_attachment).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route(
            "/items/{item_id}/attachment/{attachment_id}",
            get(handlers::download_attachment).delete(handlers::delete_attachment),
        )
        .with_state(service)
}
