use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::rooms::dtos::{CreateRoomDto, UpdateRoomDto};
use crate::features::rooms::models::Room;
use crate::shared::types::PaginationQuery;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<Room>>;

    /// One page ordered by id, plus the total count
    async fn list(&self, query: &PaginationQuery) -> Result<(Vec<Room>, i64)>;

    async fn insert(&self, dto: &CreateRoomDto) -> Result<Room>;

    async fn update(&self, id: i64, dto: &UpdateRoomDto) -> Result<Option<Room>>;

    /// Stacks in the room are kept and lose their `room_id`.
    /// Returns `false` when no row matched.
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn find(&self, id: i64) -> Result<Option<Room>> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            SELECT id, title, annotations, created_at, updated_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    async fn list(&self, query: &PaginationQuery) -> Result<(Vec<Room>, i64)> {
        let rooms = sqlx::query_as::<_, Room>(
            r#"
            SELECT id, title, annotations, created_at, updated_at
            FROM rooms
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await?;

        Ok((rooms, total))
    }

    async fn insert(&self, dto: &CreateRoomDto) -> Result<Room> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (title, annotations)
            VALUES ($1, $2)
            RETURNING id, title, annotations, created_at, updated_at
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.annotations)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create room: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(room)
    }

    async fn update(&self, id: i64, dto: &UpdateRoomDto) -> Result<Option<Room>> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
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

        Ok(room)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
