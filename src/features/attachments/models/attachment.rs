use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::attachments::dtos::AttachmentResponseDto;

/// Object store key for an attachment, derived from ids only
pub fn attachment_key(item_id: i64, attachment_id: i64) -> String {
    format!("item_{}/attachments/{}", item_id, attachment_id)
}

/// Database model for an attachment
#[derive(Debug, Clone, FromRow)]
pub struct Attachment {
    pub id: i64,
    pub item_id: i64,
    pub filename: String,
    pub content_type: String,
    pub filesize: i64,
    pub checksum_sha256: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Attachment {
    pub fn storage_key(&self) -> String {
        attachment_key(self.item_id, self.id)
    }
}

/// Metadata known before the blob is stored
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub item_id: i64,
    pub filename: String,
    pub content_type: String,
    pub filesize: i64,
}

impl From<Attachment> for AttachmentResponseDto {
    fn from(a: Attachment) -> Self {
        Self {
            id: a.id,
            item_id: a.item_id,
            filename: a.filename,
            content_type: a.content_type,
            filesize: a.filesize,
            checksum_sha256: a.checksum_sha256,
            created_at: a.created_at,
        }
    }
}
