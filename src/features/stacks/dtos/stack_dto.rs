use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::serde_helpers::nullable;
use crate::shared::types::{default_page, default_page_size, PaginationQuery};

/// Query params for listing stacks
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListStacksQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Stacks per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Only stacks standing in this room
    pub room_id: Option<i64>,
}

impl ListStacksQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

impl Default for ListStacksQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            room_id: None,
        }
    }
}

/// Request DTO for creating a stack
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateStackDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[schema(example = "Rack A")]
    pub title: String,

    /// Room the stack stands in
    pub room_id: Option<i64>,

    pub annotations: Option<serde_json::Value>,
}

/// Request DTO for updating a stack.
///
/// Absent fields are left unchanged; `"room_id": null` takes the stack out of its room.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStackDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub room_id: Option<Option<i64>>,

    pub annotations: Option<serde_json::Value>,
}

/// Response DTO for a stack
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StackResponseDto {
    pub id: i64,
    pub title: String,
    pub room_id: Option<i64>,
    pub annotations: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response DTO for stack deletion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteStackResponseDto {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_filter_and_paging_defaults() {
        let query: ListStacksQuery = serde_json::from_str(r#"{"room_id": 3}"#).unwrap();
        assert_eq!(query.room_id, Some(3));
        assert_eq!(query.pagination().offset(), 0);
        assert_eq!(query.pagination().limit(), default_page_size());
    }
}
