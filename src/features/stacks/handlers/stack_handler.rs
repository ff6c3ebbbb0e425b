use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::stacks::dtos::{
    CreateStackDto, DeleteStackResponseDto, ListStacksQuery, StackResponseDto, UpdateStackDto,
};
use crate::features::stacks::services::StackService;
use crate::shared::types::{ApiResponse, Meta};

/// List stacks
#[utoipa::path(
    get,
    path = "/stacks",
    params(ListStacksQuery),
    responses(
        (status = 200, description = "Stacks retrieved successfully", body = ApiResponse<Vec<StackResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stacks",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_stacks(
    State(service): State<Arc<StackService>>,
    Query(query): Query<ListStacksQuery>,
) -> Result<Json<ApiResponse<Vec<StackResponseDto>>>> {
    let (stacks, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(stacks),
        None,
        Some(Meta { total }),
    )))
}

/// Get stack by ID
#[utoipa::path(
    get,
    path = "/stacks/{stack_id}",
    params(
        ("stack_id" = i64, Path, description = "Stack ID")
    ),
    responses(
        (status = 200, description = "Stack found", body = ApiResponse<StackResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Stack not found")
    ),
    tag = "stacks",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_stack(
    State(service): State<Arc<StackService>>,
    Path(stack_id): Path<i64>,
) -> Result<Json<ApiResponse<StackResponseDto>>> {
    let stack = service.get(stack_id).await?;
    Ok(Json(ApiResponse::success(Some(stack), None, None)))
}

/// Create stack
#[utoipa::path(
    post,
    path = "/stacks",
    request_body = CreateStackDto,
    responses(
        (status = 201, description = "Stack created successfully", body = ApiResponse<StackResponseDto>),
        (status = 400, description = "Validation error or unknown room"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stacks",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_stack(
    State(service): State<Arc<StackService>>,
    ValidatedJson(dto): ValidatedJson<CreateStackDto>,
) -> Result<(StatusCode, Json<ApiResponse<StackResponseDto>>)> {
    let stack = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(stack),
            Some("Stack created successfully".to_string()),
            None,
        )),
    ))
}

/// Update stack
#[utoipa::path(
    put,
    path = "/stacks/{stack_id}",
    params(
        ("stack_id" = i64, Path, description = "Stack ID")
    ),
    request_body = UpdateStackDto,
    responses(
        (status = 200, description = "Stack updated successfully", body = ApiResponse<StackResponseDto>),
        (status = 400, description = "Validation error or unknown room"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Stack not found")
    ),
    tag = "stacks",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_stack(
    State(service): State<Arc<StackService>>,
    Path(stack_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateStackDto>,
) -> Result<Json<ApiResponse<StackResponseDto>>> {
    let stack = service.update(stack_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(stack),
        Some("Stack updated successfully".to_string()),
        None,
    )))
}

/// Delete stack
///
/// Items on the stack are kept and no longer sit on any stack.
#[utoipa::path(
    delete,
    path = "/stacks/{stack_id}",
    params(
        ("stack_id" = i64, Path, description = "Stack ID")
    ),
    responses(
        (status = 200, description = "Stack deleted successfully", body = ApiResponse<DeleteStackResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Stack not found")
    ),
    tag = "stacks",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_stack(
    State(service): State<Arc<StackService>>,
    Path(stack_id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteStackResponseDto>>> {
    service.delete(stack_id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeleteStackResponseDto { deleted: true }),
        Some("Stack deleted successfully".to_string()),
        None,
    )))
}
