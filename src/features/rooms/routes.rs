use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::rooms::handlers;
use crate::features::rooms::services::RoomService;

/// Room routes (require JWT authentication)
pub fn routes(service: Arc<RoomService>) -> Router {
    Router::new()
        .route(
            "/rooms",
            get(handlers::list_rooms).post(handlers::create_room),
        )
        .route(
            "/rooms/{room_id}",
            get(handlers::get_room)
                .put(handlers::update_room)
                .delete(handlers::delete_room),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::rooms::dtos::RoomResponseDto;
    use crate::shared::test_helpers::{with_test_user, InMemoryRepository};
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn server() -> TestServer {
        let repo = Arc::new(InMemoryRepository::new());
        let service = Arc::new(RoomService::new(repo));
        TestServer::new(with_test_user(routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_create_list_and_get() {
        let server = server();
        for title in ["Basement", "Attic", "Garage"] {
            server
                .post("/rooms")
                .json(&json!({ "title": title, "annotations": { "floor": 1 } }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server
            .get("/rooms")
            .add_query_param("page_size", 2)
            .await;
        response.assert_status_ok();
        let body: ApiResponse<Vec<RoomResponseDto>> = response.json();
        assert_eq!(body.meta.unwrap().total, 3);
        let page = body.data.unwrap();
        let titles: Vec<_> = page.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Basement", "Attic"]);

        let response = server.get(&format!("/rooms/{}", page[0].id)).await;
        response.assert_status_ok();
        let room = response
            .json::<ApiResponse<RoomResponseDto>>()
            .data
            .unwrap();
        assert_eq!(room.annotations, Some(json!({ "floor": 1 })));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        server()
            .post("/rooms")
            .json(&json!({ "title": "" }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_room() {
        let server = server();
        let response = server
            .put("/rooms/41")
            .json(&json!({ "title": "Nope" }))
            .await;
        response.assert_status_not_found();
        let body: ApiResponse<()> = response.json();
        assert_eq!(body.message.as_deref(), Some("Room not found"));

        server
            .delete("/rooms/41")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_delete_room() {
        let server = server();
        let created = server
            .post("/rooms")
            .json(&json!({ "title": "Shed" }))
            .await
            .json::<ApiResponse<RoomResponseDto>>()
            .data
            .unwrap();

        let response = server.delete(&format!("/rooms/{}", created.id)).await;
        response.assert_status_ok();
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(
            body.message.as_deref(),
            Some("Room deleted successfully")
        );
        server
            .get(&format!("/rooms/{}", created.id))
            .await
            .assert_status_not_found();
    }
}
