use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::tags::dtos::{
    CreateTagDto, DeleteTagResponseDto, TagResponseDto, UpdateTagDto,
};
use crate::features::tags::services::TagService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List tags
///
/// Each tag carries the number of items it is linked to.
#[utoipa::path(
    get,
    path = "/tags",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Tags retrieved successfully", body = ApiResponse<Vec<TagResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tags",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_tags(
    State(service): State<Arc<TagService>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<TagResponseDto>>>> {
    let (tags, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(tags),
        None,
        Some(Meta { total }),
    )))
}

/// Get tag by ID
#[utoipa::path(
    get,
    path = "/tags/{tag_id}",
    params(
        ("tag_id" = i64, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag found", body = ApiResponse<TagResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tag not found")
    ),
    tag = "tags",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_tag(
    State(service): State<Arc<TagService>>,
    Path(tag_id): Path<i64>,
) -> Result<Json<ApiResponse<TagResponseDto>>> {
    let tag = service.get(tag_id).await?;
    Ok(Json(ApiResponse::success(Some(tag), None, None)))
}

/// Create tag
#[utoipa::path(
    post,
    path = "/tags",
    request_body = CreateTagDto,
    responses(
        (status = 201, description = "Tag created successfully", body = ApiResponse<TagResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Tag name already exists")
    ),
    tag = "tags",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_tag(
    State(service): State<Arc<TagService>>,
    ValidatedJson(dto): ValidatedJson<CreateTagDto>,
) -> Result<(StatusCode, Json<ApiResponse<TagResponseDto>>)> {
    let tag = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(tag),
            Some("Tag created successfully".to_string()),
            None,
        )),
    ))
}

/// Update tag
#[utoipa::path(
    put,
    path = "/tags/{tag_id}",
    params(
        ("tag_id" = i64, Path, description = "Tag ID")
    ),
    request_body = UpdateTagDto,
    responses(
        (status = 200, description = "Tag updated successfully", body = ApiResponse<TagResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tag not found"),
        (status = 409, description = "Tag name already exists")
    ),
    tag = "tags",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_tag(
    State(service): State<Arc<TagService>>,
    Path(tag_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateTagDto>,
) -> Result<Json<ApiResponse<TagResponseDto>>> {
    let tag = service.update(tag_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(tag),
        Some("Tag updated successfully".to_string()),
        None,
    )))
}

/// Delete tag
///
/// Items carrying the tag are kept and lose the tag.
#[utoipa::path(
    delete,
    path = "/tags/{tag_id}",
    params(
        ("tag_id" = i64, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag deleted successfully", body = ApiResponse<DeleteTagResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tag not found")
    ),
    tag = "tags",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_tag(
    State(service): State<Arc<TagService>>,
    Path(tag_id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteTagResponseDto>>> {
    service.delete(tag_id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeleteTagResponseDto { deleted: true }),
        Some("Tag deleted successfully".to_string()),
        None,
    )))
}
