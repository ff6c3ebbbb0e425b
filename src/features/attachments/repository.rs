use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::core::error::{AppError, Result};
use crate::features::attachments::models::{Attachment, NewAttachment};

/// A row deletion held open until the matching blob is gone
///
/// Dropping it without calling `commit` rolls the deletion back.
#[async_trait]
pub trait PendingDeletion: Send {
    async fn commit(self: Box<Self>) -> Result<()>;
}

/// Persistence for attachment metadata
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Insert a row without checksum
    async fn insert(&self, new: &NewAttachment) -> Result<Attachment>;

    async fn set_checksum(&self, id: i64, checksum: &str) -> Result<Attachment>;

    /// Attachment `attachment_id` if it belongs to `item_id`
    async fn find_for_item(&self, item_id: i64, attachment_id: i64)
        -> Result<Option<Attachment>>;

    async fn list_for_item(&self, item_id: i64) -> Result<Vec<Attachment>>;

    /// Delete the row inside an open transaction. Fails with
    /// `AppError::NotFound` when no row was deleted.
    async fn begin_delete(&self, attachment_id: i64) -> Result<Box<dyn PendingDeletion>>;
}

pub struct PgAttachmentRepository {
    pool: PgPool,
}

impl PgAttachmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ATTACHMENT_COLUMNS: &str =
    "id, item_id, filename, content_type, filesize, checksum_sha256, created_at";

#[async_trait]
impl AttachmentRepository for PgAttachmentRepository {
    async fn insert(&self, new: &NewAttachment) -> Result<Attachment> {
        let sql = format!(
            r#"
            INSERT INTO attachments (item_id, filename, content_type, filesize)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            ATTACHMENT_COLUMNS
        );

        let attachment = sqlx::query_as::<_, Attachment>(&sql)
            .bind(new.item_id)
            .bind(&new.filename)
            .bind(&new.content_type)
            .bind(new.filesize)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    AppError::NotFound("Item not found".to_string())
                }
                other => {
                    tracing::error!("Failed to create attachment: {:?}", other);
                    AppError::Database(other)
                }
            })?;

        Ok(attachment)
    }

    async fn set_checksum(&self, id: i64, checksum: &str) -> Result<Attachment> {
        let sql = format!(
            "UPDATE attachments SET checksum_sha256 = $2 WHERE id = $1 RETURNING {}",
            ATTACHMENT_COLUMNS
        );

        let attachment = sqlx::query_as::<_, Attachment>(&sql)
            .bind(id)
            .bind(checksum)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Attachment not found".to_string()))?;

        Ok(attachment)
    }

    async fn find_for_item(
        &self,
        item_id: i64,
        attachment_id: i64,
    ) -> Result<Option<Attachment>> {
        let sql = format!(
            "SELECT {} FROM attachments WHERE id = $1 AND item_id = $2",
            ATTACHMENT_COLUMNS
        );

        let attachment = sqlx::query_as::<_, Attachment>(&sql)
            .bind(attachment_id)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(attachment)
    }

    async fn list_for_item(&self, item_id: i64) -> Result<Vec<Attachment>> {
        let sql = format!(
            "SELECT {} FROM attachments WHERE item_id = $1 ORDER BY id",
            ATTACHMENT_COLUMNS
        );

        let attachments = sqlx::query_as::<_, Attachment>(&sql)
            .bind(item_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(attachments)
    }

    async fn begin_delete(&self, attachment_id: i64) -> Result<Box<dyn PendingDeletion>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM attachments WHERE id = $1")
            .bind(attachment_id)
            .execute(&mut *tx)
            .await?;

        // A concurrent delete committed first
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Attachment not found".to_string()));
        }

        Ok(Box::new(PgPendingDeletion { tx }))
    }
}

struct PgPendingDeletion {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl PendingDeletion for PgPendingDeletion {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
