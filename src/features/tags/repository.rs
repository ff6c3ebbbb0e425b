use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::violated_unique_constraint;
use crate::core::error::{AppError, Result};
use crate::features::tags::dtos::{CreateTagDto, UpdateTagDto};
use crate::features::tags::models::{ItemTag, Tag};
use crate::shared::types::PaginationQuery;

const UQ_TAGS_NAME: &str = "uq_tags_name";

/// Persistence for tags and their links to items
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<Tag>>;

    /// One page ordered by name, plus the total count
    async fn list(&self, query: &PaginationQuery) -> Result<(Vec<Tag>, i64)>;

    /// Fails with `AppError::Conflict` when the name is taken
    async fn insert(&self, dto: &CreateTagDto) -> Result<Tag>;

    async fn update(&self, id: i64, dto: &UpdateTagDto) -> Result<Option<Tag>>;

    /// Removes the tag's item links too. Returns `false` when no row matched.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Idempotent
    async fn link(&self, item_id: i64, tag_id: i64) -> Result<()>;

    /// Idempotent
    async fn unlink(&self, item_id: i64, tag_id: i64) -> Result<()>;

    /// Links of every item in `item_ids`, ordered by tag name
    async fn tags_for_items(&self, item_ids: &[i64]) -> Result<Vec<ItemTag>>;
}

pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_name_taken(e: sqlx::Error) -> AppError {
    match violated_unique_constraint(&e) {
        Some(UQ_TAGS_NAME) => AppError::Conflict("Tag already exists".to_string()),
        _ => AppError::Database(e),
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn find(&self, id: i64) -> Result<Option<Tag>> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.description, t.created_at, t.updated_at,
                   (SELECT COUNT(*) FROM item_tags it WHERE it.tag_id = t.id) AS item_count
            FROM tags t
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tag)
    }

    async fn list(&self, query: &PaginationQuery) -> Result<(Vec<Tag>, i64)> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.description, t.created_at, t.updated_at,
                   (SELECT COUNT(*) FROM item_tags it WHERE it.tag_id = t.id) AS item_count
            FROM tags t
            ORDER BY t.name, t.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
            .fetch_one(&self.pool)
            .await?;

        Ok((tags, total))
    }

    async fn insert(&self, dto: &CreateTagDto) -> Result<Tag> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at, 0::BIGINT AS item_count
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_name_taken)?;

        Ok(tag)
    }

    async fn update(&self, id: i64, dto: &UpdateTagDto) -> Result<Option<Tag>> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            UPDATE tags
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at,
                      (SELECT COUNT(*) FROM item_tags it WHERE it.tag_id = tags.id) AS item_count
            "#,
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_name_taken)?;

        Ok(tag)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn link(&self, item_id: i64, tag_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO item_tags (item_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT (item_id, tag_id) DO NOTHING
            "#,
        )
        .bind(item_id)
        .bind(tag_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn unlink(&self, item_id: i64, tag_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM item_tags WHERE item_id = $1 AND tag_id = $2")
            .bind(item_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn tags_for_items(&self, item_ids: &[i64]) -> Result<Vec<ItemTag>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let links = sqlx::query_as::<_, ItemTag>(
            r#"
            SELECT it.item_id, it.tag_id, t.name
            FROM item_tags it
            JOIN tags t ON t.id = it.tag_id
            WHERE it.item_id = ANY($1)
            ORDER BY t.name, t.id
            "#,
        )
        .bind(item_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }
}
