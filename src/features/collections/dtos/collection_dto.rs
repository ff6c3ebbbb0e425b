use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for creating a collection
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCollectionDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[schema(example = "Camping gear")]
    pub title: String,

    /// Free-form JSON kept alongside the collection
    pub annotations: Option<serde_json::Value>,
}

/// Request DTO for updating a collection. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCollectionDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    pub annotations: Option<serde_json::Value>,
}

/// Response DTO for a collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionResponseDto {
    pub id: i64,
    pub title: String,
    pub annotations: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response DTO for collection deletion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteCollectionResponseDto {
    pub deleted: bool,
}
