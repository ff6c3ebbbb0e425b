use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::collections::dtos::{
    CollectionResponseDto, CreateCollectionDto, DeleteCollectionResponseDto, UpdateCollectionDto,
};
use crate::features::collections::services::CollectionService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List collections
#[utoipa::path(
    get,
    path = "/collections",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Collections retrieved successfully", body = ApiResponse<Vec<CollectionResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "collections",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_collections(
    State(service): State<Arc<CollectionService>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<CollectionResponseDto>>>> {
    let (collections, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(collections),
        None,
        Some(Meta { total }),
    )))
}

/// Get collection by ID
#[utoipa::path(
    get,
    path = "/collections/{collection_id}",
    params(
        ("collection_id" = i64, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection found", body = ApiResponse<CollectionResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Collection not found")
    ),
    tag = "collections",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_collection(
    State(service): State<Arc<CollectionService>>,
    Path(collection_id): Path<i64>,
) -> Result<Json<ApiResponse<CollectionResponseDto>>> {
    let collection = service.get(collection_id).await?;
    Ok(Json(ApiResponse::success(Some(collection), None, None)))
}

/// Create collection
#[utoipa::path(
    post,
    path = "/collections",
    request_body = CreateCollectionDto,
    responses(
        (status = 201, description = "Collection created successfully", body = ApiResponse<CollectionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "collections",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_collection(
    State(service): State<Arc<CollectionService>>,
    ValidatedJson(dto): ValidatedJson<CreateCollectionDto>,
) -> Result<(StatusCode, Json<ApiResponse<CollectionResponseDto>>)> {
    let collection = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(collection),
            Some("Collection created successfully".to_string()),
            None,
        )),
    ))
}

/// Update collection
#[utoipa::path(
    put,
    path = "/collections/{collection_id}",
    params(
        ("collection_id" = i64, Path, description = "Collection ID")
    ),
    request_body = UpdateCollectionDto,
    responses(
        (status = 200, description = "Collection updated successfully", body = ApiResponse<CollectionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Collection not found")
    ),
    tag = "collections",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_collection(
    State(service): State<Arc<CollectionService>>,
    Path(collection_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateCollectionDto>,
) -> Result<Json<ApiResponse<CollectionResponseDto>>> {
    let collection = service.update(collection_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(collection),
        Some("Collection updated successfully".to_string()),
        None,
    )))
}

/// Delete collection
///
/// Items in the collection are kept and no longer belong to any collection.
#[utoipa::path(
    delete,
    path = "/collections/{collection_id}",
    params(
        ("collection_id" = i64, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection deleted successfully", body = ApiResponse<DeleteCollectionResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Collection not found")
    ),
    tag = "collections",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_collection(
    State(service): State<Arc<CollectionService>>,
    Path(collection_id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteCollectionResponseDto>>> {
    service.delete(collection_id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeleteCollectionResponseDto { deleted: true }),
        Some("Collection deleted successfully".to_string()),
        None,
    )))
}
