use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for creating a tag
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTagDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[schema(example = "fragile")]
    pub name: String,

    pub description: Option<String>,
}

/// Request DTO for updating a tag. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTagDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,
}

/// Response DTO for a tag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagResponseDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub item_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tag as embedded in an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TagSummaryDto {
    pub id: i64,
    pub name: String,
}

/// Response DTO for tag deletion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteTagResponseDto {
    pub deleted: bool,
}
