use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::tags::dtos::{TagResponseDto, TagSummaryDto};

#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Number of items carrying the tag
    pub item_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the item/tag link table joined with the tag name
#[derive(Debug, Clone, FromRow)]
pub struct ItemTag {
    pub item_id: i64,
    pub tag_id: i64,
    pub name: String,
}

impl From<Tag> for TagResponseDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            description: tag.description,
            item_count: tag.item_count,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        }
    }
}

impl From<ItemTag> for TagSummaryDto {
    fn from(link: ItemTag) -> Self {
        Self {
            id: link.tag_id,
            name: link.name,
        }
    }
}
