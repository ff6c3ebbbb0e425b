use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::rooms::dtos::{
    CreateRoomDto, DeleteRoomResponseDto, RoomResponseDto, UpdateRoomDto,
};
use crate::features::rooms::services::RoomService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List rooms
#[utoipa::path(
    get,
    path = "/rooms",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Rooms retrieved successfully", body = ApiResponse<Vec<RoomResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "rooms",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_rooms(
    State(service): State<Arc<RoomService>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<RoomResponseDto>>>> {
    let (rooms, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(rooms),
        None,
        Some(Meta { total }),
    )))
}

/// Get room by ID
#[utoipa::path(
    get,
    path = "/rooms/{room_id}",
    params(
        ("room_id" = i64, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room found", body = ApiResponse<RoomResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Room not found")
    ),
    tag = "rooms",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_room(
    State(service): State<Arc<RoomService>>,
    Path(room_id): Path<i64>,
) -> Result<Json<ApiResponse<RoomResponseDto>>> {
    let room = service.get(room_id).await?;
    Ok(Json(ApiResponse::success(Some(room), None, None)))
}

/// Create room
#[utoipa::path(
    post,
    path = "/rooms",
    request_body = CreateRoomDto,
    responses(
        (status = 201, description = "Room created successfully", body = ApiResponse<RoomResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "rooms",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_room(
    State(service): State<Arc<RoomService>>,
    ValidatedJson(dto): ValidatedJson<CreateRoomDto>,
) -> Result<(StatusCode, Json<ApiResponse<RoomResponseDto>>)> {
    let room = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(room),
            Some("Room created successfully".to_string()),
            None,
        )),
    ))
}

/// Update room
#[utoipa::path(
    put,
    path = "/rooms/{room_id}",
    params(
        ("room_id" = i64, Path, description = "Room ID")
    ),
    request_body = UpdateRoomDto,
    responses(
        (status = 200, description = "Room updated successfully", body = ApiResponse<RoomResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Room not found")
    ),
    tag = "rooms",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_room(
    State(service): State<Arc<RoomService>>,
    Path(room_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateRoomDto>,
) -> Result<Json<ApiResponse<RoomResponseDto>>> {
    let room = service.update(room_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(room),
        Some("Room updated successfully".to_string()),
        None,
    )))
}

/// Delete room
///
/// Stacks in the room are kept and no longer stand in any room.
#[utoipa::path(
    delete,
    path = "/rooms/{room_id}",
    params(
        ("room_id" = i64, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room deleted successfully", body = ApiResponse<DeleteRoomResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Room not found")
    ),
    tag = "rooms",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_room(
    State(service): State<Arc<RoomService>>,
    Path(room_id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteRoomResponseDto>>> {
    service.delete(room_id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeleteRoomResponseDto { deleted: true }),
        Some("Room deleted successfully".to_string()),
        None,
    )))
}
