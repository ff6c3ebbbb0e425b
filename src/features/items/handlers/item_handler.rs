use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::items::dtos::{
    CreateItemDto, DeleteItemResponseDto, ItemResponseDto, ListItemsQuery, UpdateItemDto,
};
use crate::features::items::services::ItemService;
use crate::shared::types::{ApiResponse, Meta};

/// List items
///
/// Filters combine: `collection_id`, `stack_id` and `tag_ids` (all listed
/// tags must be present) narrow the result together.
#[utoipa::path(
    get,
    path = "/items",
    params(ListItemsQuery),
    responses(
        (status = 200, description = "Items retrieved successfully", body = ApiResponse<Vec<ItemResponseDto>>),
        (status = 400, description = "Malformed query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "items",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_items(
    State(service): State<Arc<ItemService>>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    let (items, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Get item by ID
#[utoipa::path(
    get,
    path = "/items/{item_id}",
    params(
        ("item_id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ApiResponse<ItemResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Item not found")
    ),
    tag = "items",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_item(
    State(service): State<Arc<ItemService>>,
    Path(item_id): Path<i64>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let item = service.get(item_id).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Create item
#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateItemDto,
    responses(
        (status = 201, description = "Item created successfully", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Validation error or unknown collection/stack"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "items",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_item(
    State(service): State<Arc<ItemService>>,
    ValidatedJson(dto): ValidatedJson<CreateItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<ItemResponseDto>>)> {
    let item = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item),
            Some("Item created successfully".to_string()),
            None,
        )),
    ))
}

/// Update item
#[utoipa::path(
    put,
    path = "/items/{item_id}",
    params(
        ("item_id" = i64, Path, description = "Item ID")
    ),
    request_body = UpdateItemDto,
    responses(
        (status = 200, description = "Item updated successfully", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Validation error or unknown collection/stack"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Item not found")
    ),
    tag = "items",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_item(
    State(service): State<Arc<ItemService>>,
    Path(item_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateItemDto>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let item = service.update(item_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(item),
        Some("Item updated successfully".to_string()),
        None,
    )))
}

/// Delete item
///
/// Items that still have attachments are rejected with 409.
#[utoipa::path(
    delete,
    path = "/items/{item_id}",
    params(
        ("item_id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted successfully", body = ApiResponse<DeleteItemResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Item still has attachments")
    ),
    tag = "items",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_item(
    State(service): State<Arc<ItemService>>,
    Path(item_id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteItemResponseDto>>> {
    service.delete(item_id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeleteItemResponseDto { deleted: true }),
        Some("Item deleted successfully".to_string()),
        None,
    )))
}

/// Add tag to item
///
/// Idempotent: tagging an item twice leaves a single link.
#[utoipa::path(
    put,
    path = "/items/{item_id}/tag/{tag_id}",
    params(
        ("item_id" = i64, Path, description = "Item ID"),
        ("tag_id" = i64, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag added to item", body = ApiResponse<ItemResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Item or tag not found")
    ),
    tag = "items",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_item_tag(
    State(service): State<Arc<ItemService>>,
    Path((item_id, tag_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let item = service.add_tag(item_id, tag_id).await?;
    Ok(Json(ApiResponse::success(
        Some(item),
        Some("Tag added to item".to_string()),
        None,
    )))
}

/// Remove tag from item
#[utoipa::path(
    delete,
    path = "/items/{item_id}/tag/{tag_id}",
    params(
        ("item_id" = i64, Path, description = "Item ID"),
        ("tag_id" = i64, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag removed from item", body = ApiResponse<ItemResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Item or tag not found")
    ),
    tag = "items",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_item_tag(
    State(service): State<Arc<ItemService>>,
    Path((item_id, tag_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let item = service.remove_tag(item_id, tag_id).await?;
    Ok(Json(ApiResponse::success(
        Some(item),
        Some("Tag removed from item".to_string()),
        None,
    )))
}
