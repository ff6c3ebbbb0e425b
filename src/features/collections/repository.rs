use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::collections::dtos::{CreateCollectionDto, UpdateCollectionDto};
use crate::features::collections::models::Collection;
use crate::shared::types::PaginationQuery;

#[async_trait]
pub trait CollectionRepository: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<Collection>>;

    /// One page ordered by id, plus the total count
    async fn list(&self, query: &PaginationQuery) -> Result<(Vec<Collection>, i64)>;

    async fn insert(&self, dto: &CreateCollectionDto) -> Result<Collection>;

    async fn update(&self, id: i64, dto: &UpdateCollectionDto) -> Result<Option<Collection>>;

    /// Items of the collection are kept and lose their `collection_id`.
    /// Returns `false` when no row matched.
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct PgCollectionRepository {
    pool: PgPool,
}

impl PgCollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionRepository for PgCollectionRepository {
    async fn find(&self, id: i64) -> Result<Option<Collection>> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, title, annotations, created_at, updated_at
            FROM collections
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collection)
    }

    async fn list(&self, query: &PaginationQuery) -> Result<(Vec<Collection>, i64)> {
        let collections = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, title, annotations, created_at, updated_at
            FROM collections
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM collections")
            .fetch_one(&self.pool)
            .await?;

        Ok((collections, total))
    }

    async fn insert(&self, dto: &CreateCollectionDto) -> Result<Collection> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            INSERT INTO collections (title, annotations)
            VALUES ($1, $2)
            RETURNING id, title, annotations, created_at, updated_at
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.annotations)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create collection: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(collection)
    }

    async fn update(&self, id: i64, dto: &UpdateCollectionDto) -> Result<Option<Collection>> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            UPDATE collections
            SET title = COALESCE($2, title),
                annotations = COALESCE($3, annotations),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, annotations, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.annotations)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collection)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
