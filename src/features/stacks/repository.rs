use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::violated_foreign_key;
use crate::core::error::{AppError, Result};
use crate::features::stacks::dtos::{CreateStackDto, ListStacksQuery, UpdateStackDto};
use crate::features::stacks::models::Stack;

const FK_STACKS_ROOM: &str = "fk_stacks_room";

#[async_trait]
pub trait StackRepository: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<Stack>>;

    /// One page ordered by id, plus the total count of matching stacks
    async fn list(&self, query: &ListStacksQuery) -> Result<(Vec<Stack>, i64)>;

    /// Fails with `AppError::Validation` when `room_id` names no room
    async fn insert(&self, dto: &CreateStackDto) -> Result<Stack>;

    async fn update(&self, id: i64, dto: &UpdateStackDto) -> Result<Option<Stack>>;

    /// Items on the stack are kept and lose their `stack_id`.
    /// Returns `false` when no row matched.
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct PgStackRepository {
    pool: PgPool,
}

impl PgStackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_room_reference(e: sqlx::Error) -> AppError {
    match violated_foreign_key(&e) {
        Some(FK_STACKS_ROOM) => AppError::Validation("Room not found".to_string()),
        _ => AppError::Database(e),
    }
}

#[async_trait]
impl StackRepository for PgStackRepository {
    async fn find(&self, id: i64) -> Result<Option<Stack>> {
        let stack = sqlx::query_as::<_, Stack>(
            r#"
            SELECT id, title, room_id, annotations, created_at, updated_at
            FROM stacks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stack)
    }

    async fn list(&self, query: &ListStacksQuery) -> Result<(Vec<Stack>, i64)> {
        let page = query.pagination();

        let stacks = sqlx::query_as::<_, Stack>(
            r#"
            SELECT id, title, room_id, annotations, created_at, updated_at
            FROM stacks
            WHERE ($1::BIGINT IS NULL OR room_id = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.room_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM stacks WHERE ($1::BIGINT IS NULL OR room_id = $1)",
        )
        .bind(query.room_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((stacks, total))
    }

    async fn insert(&self, dto: &CreateStackDto) -> Result<Stack> {
        let stack = sqlx::query_as::<_, Stack>(
            r#"
            INSERT INTO stacks (title, room_id, annotations)
            VALUES ($1, $2, $3)
            RETURNING id, title, room_id, annotations, created_at, updated_at
            "#,
        )
        .bind(&dto.title)
        .bind(dto.room_id)
        .bind(&dto.annotations)
        .fetch_one(&self.pool)
        .await
        .map_err(map_room_reference)?;

        Ok(stack)
    }

    async fn update(&self, id: i64, dto: &UpdateStackDto) -> Result<Option<Stack>> {
        let stack = sqlx::query_as::<_, Stack>(
            r#"
            UPDATE stacks
            SET title = COALESCE($2, title),
                room_id = CASE WHEN $3 THEN $4::BIGINT ELSE room_id END,
                annotations = COALESCE($5, annotations),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, room_id, annotations, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&dto.title)
        .bind(dto.room_id.is_some())
        .bind(dto.room_id.flatten())
        .bind(&dto.annotations)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_room_reference)?;

        Ok(stack)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM stacks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
