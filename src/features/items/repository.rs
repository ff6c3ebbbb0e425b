use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::violated_foreign_key;
use crate::core::error::{AppError, Result};
use crate::features::items::dtos::{CreateItemDto, ListItemsQuery, UpdateItemDto};
use crate::features::items::models::Item;

const FK_ITEMS_COLLECTION: &str = "fk_items_collection";
const FK_ITEMS_STACK: &str = "fk_items_stack";

const ITEM_COLUMNS: &str = "i.id, i.title, i.description, i.collection_id, i.stack_id, \
                            i.shelf, i.slot, i.created_at, i.updated_at";

const RETURNING_COLUMNS: &str = "id, title, description, collection_id, stack_id, \
                                 shelf, slot, created_at, updated_at";

// $1 collection, $2 stack, $3 tag ids (all required)
const LIST_FILTER: &str = r#"
    ($1::BIGINT IS NULL OR i.collection_id = $1)
    AND ($2::BIGINT IS NULL OR i.stack_id = $2)
    AND (
        SELECT COUNT(*) FROM item_tags it
        WHERE it.item_id = i.id AND it.tag_id = ANY($3)
    ) = cardinality($3::BIGINT[])
"#;

/// Persistence for items
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<Item>>;

    /// One page of matching items plus the total count of matches
    async fn list(&self, query: &ListItemsQuery) -> Result<(Vec<Item>, i64)>;

    /// Fails with `AppError::Validation` when the collection or stack does not exist
    async fn insert(&self, dto: &CreateItemDto) -> Result<Item>;

    async fn update(&self, id: i64, dto: &UpdateItemDto) -> Result<Option<Item>>;

    /// Returns `false` when no row matched. Fails with `AppError::Conflict`
    /// while the item still has attachments.
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_reference_error(e: sqlx::Error) -> AppError {
    match violated_foreign_key(&e) {
        Some(FK_ITEMS_COLLECTION) => AppError::Validation("Collection not found".to_string()),
        Some(FK_ITEMS_STACK) => AppError::Validation("Stack not found".to_string()),
        _ => {
            tracing::error!("Failed to write item: {:?}", e);
            AppError::Database(e)
        }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn find(&self, id: i64) -> Result<Option<Item>> {
        let sql = format!("SELECT {} FROM items i WHERE i.id = $1", ITEM_COLUMNS);

        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    async fn list(&self, query: &ListItemsQuery) -> Result<(Vec<Item>, i64)> {
        // The ORDER BY body comes from closed enums, never from user text
        let sql = format!(
            r#"
            SELECT {}
            FROM items i
            LEFT JOIN collections c ON c.id = i.collection_id
            LEFT JOIN stacks s ON s.id = i.stack_id
            WHERE {}
            ORDER BY {}
            LIMIT $4 OFFSET $5
            "#,
            ITEM_COLUMNS,
            LIST_FILTER,
            query.sort_by.order_clause(query.order)
        );

        let items = sqlx::query_as::<_, Item>(&sql)
            .bind(query.collection_id)
            .bind(query.stack_id)
            .bind(&query.tag_ids)
            .bind(query.limit())
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM items i WHERE {}", LIST_FILTER);
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(query.collection_id)
            .bind(query.stack_id)
            .bind(&query.tag_ids)
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn insert(&self, dto: &CreateItemDto) -> Result<Item> {
        let sql = format!(
            r#"
            INSERT INTO items (title, description, collection_id, stack_id, shelf, slot)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        );

        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(dto.collection_id)
            .bind(dto.stack_id)
            .bind(dto.shelf)
            .bind(dto.slot)
            .fetch_one(&self.pool)
            .await
            .map_err(map_reference_error)?;

        Ok(item)
    }

    async fn update(&self, id: i64, dto: &UpdateItemDto) -> Result<Option<Item>> {
        // Each nullable column takes a "was it sent" flag plus the new value
        let sql = format!(
            r#"
            UPDATE items
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                collection_id = CASE WHEN $4 THEN $5::BIGINT ELSE collection_id END,
                stack_id = CASE WHEN $6 THEN $7::BIGINT ELSE stack_id END,
                shelf = CASE WHEN $8 THEN $9::INTEGER ELSE shelf END,
                slot = CASE WHEN $10 THEN $11::INTEGER ELSE slot END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        );

        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(dto.collection_id.is_some())
            .bind(dto.collection_id.flatten())
            .bind(dto.stack_id.is_some())
            .bind(dto.stack_id.flatten())
            .bind(dto.shelf.is_some())
            .bind(dto.shelf.flatten())
            .bind(dto.slot.is_some())
            .bind(dto.slot.flatten())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_reference_error)?;

        Ok(item)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    AppError::Conflict("Item has attachments; delete them first".to_string())
                }
                other => AppError::Database(other),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
