use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::tags::dtos::TagSummaryDto;
use crate::shared::constants::MAX_PAGE_SIZE;
use crate::shared::serde_helpers::{comma_separated_ids, nullable};
use crate::shared::types::{default_page, default_page_size};

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Key items can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemSortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Id,
    /// Collection title; items outside any collection come last
    Collection,
    /// Stack title, then shelf, then slot; unplaced items come last
    Stack,
}

impl ItemSortBy {
    /// `ORDER BY` body over `items i`, `collections c` and `stacks s`.
    ///
    /// Ties always fall back to the item id in the same direction.
    pub fn order_clause(&self, order: SortDirection) -> String {
        let dir = order.as_sql();
        match self {
            ItemSortBy::CreatedAt => format!("i.created_at {dir}, i.id {dir}"),
            ItemSortBy::UpdatedAt => format!("i.updated_at {dir}, i.id {dir}"),
            ItemSortBy::Title => format!("i.title {dir}, i.id {dir}"),
            ItemSortBy::Id => format!("i.id {dir}"),
            ItemSortBy::Collection => format!("c.title {dir} NULLS LAST, i.id {dir}"),
            ItemSortBy::Stack => format!(
                "s.title {dir} NULLS LAST, i.shelf {dir} NULLS LAST, i.slot {dir} NULLS LAST, i.id {dir}"
            ),
        }
    }
}

/// Query params for listing items
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListItemsQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Key to sort by (default: created_at)
    #[serde(default)]
    pub sort_by: ItemSortBy,
    /// Sort direction (default: desc)
    #[serde(default)]
    pub order: SortDirection,
    /// Only items in this collection
    pub collection_id: Option<i64>,
    /// Only items on this stack
    pub stack_id: Option<i64>,
    /// Comma-separated tag ids; only items carrying all of them
    #[serde(default, deserialize_with = "comma_separated_ids")]
    #[param(value_type = Option<String>, example = "3,7")]
    pub tag_ids: Vec<i64>,
}

impl ListItemsQuery {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for ListItemsQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            sort_by: ItemSortBy::default(),
            order: SortDirection::default(),
            collection_id: None,
            stack_id: None,
            tag_ids: Vec::new(),
        }
    }
}

/// Request DTO for creating an item
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateItemDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[schema(example = "Cordless drill")]
    pub title: String,

    #[schema(example = "18V, two batteries, in the blue case")]
    pub description: Option<String>,

    pub collection_id: Option<i64>,

    pub stack_id: Option<i64>,

    /// Shelf number on the stack
    #[validate(range(min = 0, message = "Shelf must not be negative"))]
    pub shelf: Option<i32>,

    /// Slot number on the shelf
    #[validate(range(min = 0, message = "Slot must not be negative"))]
    pub slot: Option<i32>,
}

/// Request DTO for updating an item.
///
/// Absent fields are left unchanged. Placement fields also accept `null`,
/// which clears them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateItemDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub collection_id: Option<Option<i64>>,

    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub stack_id: Option<Option<i64>>,

    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 0, message = "Shelf must not be negative"))]
    #[schema(value_type = Option<i32>)]
    pub shelf: Option<Option<i32>>,

    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 0, message = "Slot must not be negative"))]
    #[schema(value_type = Option<i32>)]
    pub slot: Option<Option<i32>>,
}

/// Response DTO for an item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemResponseDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub collection_id: Option<i64>,
    pub stack_id: Option<i64>,
    pub shelf: Option<i32>,
    pub slot: Option<i32>,
    /// Tags on the item, ordered by name
    pub tags: Vec<TagSummaryDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response DTO for item deletion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteItemResponseDto {
    pub deleted: bool,
}
