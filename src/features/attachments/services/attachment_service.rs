use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncSeek, AsyncSeekExt};
use tracing::{debug, error, info, warn};

use crate::core::config::AttachmentConfig;
use crate::core::error::{AppError, Result};
use crate::features::attachments::dtos::AttachmentResponseDto;
use crate::features::attachments::models::{Attachment, NewAttachment};
use crate::features::attachments::repository::AttachmentRepository;
use crate::features::items::ItemRepository;
use crate::modules::storage::{BlobStore, BlobStream, StorageError};
use crate::shared::checksum::sha256_hex;

/// Metadata of an upload whose body has already been received
#[derive(Debug, Clone)]
pub struct UploadMeta {
    pub filename: String,
    pub content_type: String,
    pub filesize: u64,
}

/// Keeps attachment rows and their blobs consistent
pub struct AttachmentService {
    items: Arc<dyn ItemRepository>,
    attachments: Arc<dyn AttachmentRepository>,
    blob_store: Arc<dyn BlobStore>,
    config: AttachmentConfig,
}

impl AttachmentService {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        attachments: Arc<dyn AttachmentRepository>,
        blob_store: Arc<dyn BlobStore>,
        config: AttachmentConfig,
    ) -> Self {
        Self {
            items,
            attachments,
            blob_store,
            config,
        }
    }

    async fn require_item(&self, item_id: i64) -> Result<()> {
        match self.items.find(item_id).await? {
            Some(_) => Ok(()),
            None => {
                debug!(item_id, "Item not found");
                Err(AppError::NotFound("Item not found".to_string()))
            }
        }
    }

    async fn require_attachment(&self, item_id: i64, attachment_id: i64) -> Result<Attachment> {
        self.require_item(item_id).await?;

        self.attachments
            .find_for_item(item_id, attachment_id)
            .await?
            .ok_or_else(|| {
                debug!(item_id, attachment_id, "Attachment not found");
                AppError::NotFound("Attachment not found".to_string())
            })
    }

    pub async fn list(&self, item_id: i64) -> Result<Vec<AttachmentResponseDto>> {
        self.require_item(item_id).await?;

        let attachments = self.attachments.list_for_item(item_id).await?;
        Ok(attachments.into_iter().map(Into::into).collect())
    }

    /// Record, checksum and store an upload.
    ///
    /// `reader` is read twice: once for the digest and once for the store,
    /// so it must be seekable. Its starting position is irrelevant.
    pub async fn create<R>(
        &self,
        item_id: i64,
        meta: UploadMeta,
        reader: &mut R,
    ) -> Result<AttachmentResponseDto>
    where
        R: AsyncRead + AsyncSeek + Unpin + Send,
    {
        self.require_item(item_id).await?;

        let filesize = i64::try_from(meta.filesize)
            .map_err(|_| AppError::BadRequest("File too large".to_string()))?;

        let attachment = self
            .attachments
            .insert(&NewAttachment {
                item_id,
                filename: meta.filename,
                content_type: meta.content_type,
                filesize,
            })
            .await?;
        let path = attachment.storage_key();

        let checksum = match self.digest(&mut *reader).await {
            Ok(checksum) => checksum,
            Err(e) => {
                error!(
                    item_id,
                    attachment_id = attachment.id,
                    attachment_path = %path,
                    "Failed to read upload: {}",
                    e
                );
                return Err(AppError::Internal("Failed to read upload".to_string()));
            }
        };

        if let Err(e) = self
            .blob_store
            .put(&path, &mut *reader, &attachment.content_type)
            .await
        {
            error!(
                item_id,
                attachment_id = attachment.id,
                attachment_path = %path,
                "Upload failed: {}",
                e
            );
            return Err(AppError::UpstreamWrite("Upload failed".to_string()));
        }

        let attachment = self.attachments.set_checksum(attachment.id, &checksum).await?;

        info!(
            item_id,
            attachment_id = attachment.id,
            attachment_path = %path,
            filesize = attachment.filesize,
            "Attachment uploaded"
        );

        Ok(attachment.into())
    }

    /// Hash from offset 0 and leave the reader rewound for the upload pass
    async fn digest<R>(&self, reader: &mut R) -> std::io::Result<String>
    where
        R: AsyncRead + AsyncSeek + Unpin + Send,
    {
        reader.rewind().await?;
        let checksum = sha256_hex(&mut *reader, self.config.hash_chunk_size).await?;
        reader.rewind().await?;
        Ok(checksum)
    }

    /// Metadata and a byte stream for the attachment's blob
    pub async fn open(&self, item_id: i64, attachment_id: i64) -> Result<(Attachment, BlobStream)> {
        let attachment = self.require_attachment(item_id, attachment_id).await?;
        let path = attachment.storage_key();

        match self.blob_store.get(&path).await {
            Ok(stream) => {
                debug!(item_id, attachment_id, attachment_path = %path, "Streaming attachment");
                Ok((attachment, stream))
            }
            Err(StorageError::NotFound(_)) if attachment.checksum_sha256.is_some() => {
                error!(
                    item_id,
                    attachment_id,
                    attachment_path = %path,
                    "Attachment has a checksum but its blob is missing"
                );
                Err(AppError::IntegrityAnomaly(
                    "Attachment not found in object store".to_string(),
                ))
            }
            Err(StorageError::NotFound(_)) => {
                warn!(
                    item_id,
                    attachment_id,
                    attachment_path = %path,
                    "Attachment upload never completed"
                );
                Err(AppError::NotFound(
                    "Attachment not found in object store".to_string(),
                ))
            }
            Err(e) => {
                error!(
                    item_id,
                    attachment_id,
                    attachment_path = %path,
                    "Download failed: {}",
                    e
                );
                Err(AppError::Internal("Download failed".to_string()))
            }
        }
    }

    /// Remove the row and the blob together.
    ///
    /// The row deletion stays uncommitted until the blob delete has succeeded
    /// or the blob turned out to be absent already.
    pub async fn delete(&self, item_id: i64, attachment_id: i64) -> Result<()> {
        let attachment = self.require_attachment(item_id, attachment_id).await?;
        let path = attachment.storage_key();

        let pending = self.attachments.begin_delete(attachment.id).await?;

        match self.blob_store.delete(&path).await {
            Ok(()) => {}
            Err(StorageError::NotFound(_)) => {
                warn!(
                    item_id,
                    attachment_id,
                    attachment_path = %path,
                    "File was missing from object store"
                );
            }
            Err(e) => {
                error!(
                    item_id,
                    attachment_id,
                    attachment_path = %path,
                    "Delete failed: {}",
                    e
                );
                drop(pending);
                return Err(AppError::UpstreamWrite("Delete failed".to_string()));
            }
        }

        pending.commit().await?;

        debug!(item_id, attachment_id, attachment_path = %path, "Attachment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::attachments::models::attachment_key;
    use crate::modules::storage::InMemoryBlobStore;
    use crate::shared::test_helpers::InMemoryRepository;
    use futures::TryStreamExt;
    use sha2::{Digest, Sha256};
    use std::io::Cursor;

    struct Fixture {
        service: AttachmentService,
        repo: Arc<InMemoryRepository>,
        store: Arc<InMemoryBlobStore>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryRepository::new());
        let store = Arc::new(InMemoryBlobStore::new());
        let service = AttachmentService::new(
            repo.clone(),
            repo.clone(),
            store.clone(),
            AttachmentConfig::default(),
        );
        Fixture {
            service,
            repo,
            store,
        }
    }

    fn meta(filename: &str, data: &[u8]) -> UploadMeta {
        UploadMeta {
            filename: filename.to_string(),
            content_type: "application/pdf".to_string(),
            filesize: data.len() as u64,
        }
    }

    async fn read_all(stream: BlobStream) -> Vec<u8> {
        let chunks: Vec<_> = stream.try_collect().await.unwrap();
        chunks.concat()
    }

    #[tokio::test]
    async fn test_upload_then_open_round_trips_bytes() {
        let f = fixture();
        let item = f.repo.seed_item("Drill");
        let data: Vec<u8> = (0..3 * 1024 * 1024).map(|i| (i % 251) as u8).collect();

        // Reader starts at its end, as a freshly spooled file does
        let mut reader = Cursor::new(data.clone());
        reader.set_position(data.len() as u64);

        let created = f
            .service
            .create(item, meta("manual.pdf", &data), &mut reader)
            .await
            .unwrap();

        let expected = hex::encode(Sha256::digest(&data));
        assert_eq!(created.checksum_sha256.as_deref(), Some(expected.as_str()));
        assert_eq!(created.filesize, data.len() as i64);

        let (attachment, stream) = f.service.open(item, created.id).await.unwrap();
        assert_eq!(attachment.content_type, "application/pdf");
        assert_eq!(read_all(stream).await, data);
        assert!(f.store.contains(&attachment_key(item, created.id)));
    }

    #[tokio::test]
    async fn test_upload_for_missing_item_creates_nothing() {
        let f = fixture();
        let mut reader = Cursor::new(b"hello".to_vec());

        let result = f
            .service
            .create(77, meta("a.txt", b"hello"), &mut reader)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Item not found"));
        assert_eq!(f.repo.attachment_count(), 0);
        assert_eq!(f.store.len(), 0);
    }

    #[tokio::test]
    async fn test_failed_store_write_leaves_row_without_checksum() {
        let f = fixture();
        let item = f.repo.seed_item("Drill");
        f.store.fail_puts(true);
        let mut reader = Cursor::new(b"bytes".to_vec());

        let result = f
            .service
            .create(item, meta("a.bin", b"bytes"), &mut reader)
            .await;

        assert!(matches!(result, Err(AppError::UpstreamWrite(msg)) if msg == "Upload failed"));
        let rows = f.service.list(item).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].checksum_sha256.is_none());
    }

    #[tokio::test]
    async fn test_open_checks_item_and_attachment_pairing() {
        let f = fixture();
        let item = f.repo.seed_item("Drill");
        let other = f.repo.seed_item("Saw");
        let mut reader = Cursor::new(b"x".to_vec());
        let created = f
            .service
            .create(item, meta("x", b"x"), &mut reader)
            .await
            .unwrap();

        assert!(matches!(
            f.service.open(item, created.id + 100).await,
            Err(AppError::NotFound(msg)) if msg == "Attachment not found"
        ));
        assert!(matches!(
            f.service.open(other, created.id).await,
            Err(AppError::NotFound(msg)) if msg == "Attachment not found"
        ));
        assert!(matches!(
            f.service.open(999, created.id).await,
            Err(AppError::NotFound(msg)) if msg == "Item not found"
        ));
    }

    #[tokio::test]
    async fn test_missing_blob_with_checksum_is_integrity_anomaly() {
        let f = fixture();
        let item = f.repo.seed_item("Drill");
        let mut reader = Cursor::new(b"x".to_vec());
        let created = f
            .service
            .create(item, meta("x", b"x"), &mut reader)
            .await
            .unwrap();
        f.store.remove_out_of_band(&attachment_key(item, created.id));

        assert!(matches!(
            f.service.open(item, created.id).await,
            Err(AppError::IntegrityAnomaly(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_blob_without_checksum_is_not_found() {
        let f = fixture();
        let item = f.repo.seed_item("Drill");
        let id = f.repo.seed_attachment(item, "partial.bin", None);

        assert!(matches!(
            f.service.open(item, id).await,
            Err(AppError::NotFound(msg)) if msg == "Attachment not found in object store"
        ));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let f = fixture();
        let item = f.repo.seed_item("Drill");
        let mut reader = Cursor::new(b"x".to_vec());
        let created = f
            .service
            .create(item, meta("x", b"x"), &mut reader)
            .await
            .unwrap();

        f.service.delete(item, created.id).await.unwrap();
        assert_eq!(f.store.len(), 0);
        assert!(matches!(
            f.service.delete(item, created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_with_absent_blob_succeeds() {
        let f = fixture();
        let item = f.repo.seed_item("Drill");
        let id = f.repo.seed_attachment(item, "orphan.bin", Some("ab".repeat(32)));

        f.service.delete(item, id).await.unwrap();
        assert_eq!(f.repo.attachment_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_blob_delete_keeps_row() {
        let f = fixture();
        let item = f.repo.seed_item("Drill");
        let mut reader = Cursor::new(b"x".to_vec());
        let created = f
            .service
            .create(item, meta("x", b"x"), &mut reader)
            .await
            .unwrap();
        f.store.fail_deletes(true);

        assert!(matches!(
            f.service.delete(item, created.id).await,
            Err(AppError::UpstreamWrite(_))
        ));
        assert_eq!(f.repo.attachment_count(), 1);
        assert!(f.store.contains(&attachment_key(item, created.id)));
    }

    /// Another request deletes the row between our lookup and our delete
    struct LosesDeleteRace {
        inner: Arc<InMemoryRepository>,
    }

    #[async_trait::async_trait]
    impl AttachmentRepository for LosesDeleteRace {
        async fn insert(&self, new: &NewAttachment) -> Result<Attachment> {
            AttachmentRepository::insert(&*self.inner, new).await
        }

        async fn set_checksum(&self, id: i64, checksum: &str) -> Result<Attachment> {
            self.inner.set_checksum(id, checksum).await
        }

        async fn find_for_item(
            &self,
            item_id: i64,
            attachment_id: i64,
        ) -> Result<Option<Attachment>> {
            self.inner.find_for_item(item_id, attachment_id).await
        }

        async fn list_for_item(&self, item_id: i64) -> Result<Vec<Attachment>> {
            self.inner.list_for_item(item_id).await
        }

        async fn begin_delete(
            &self,
            attachment_id: i64,
        ) -> Result<Box<dyn crate::features::attachments::repository::PendingDeletion>> {
            self.inner.begin_delete(attachment_id).await?.commit().await?;
            self.inner.begin_delete(attachment_id).await
        }
    }

    #[tokio::test]
    async fn test_delete_that_loses_a_race_is_not_found() {
        let repo = Arc::new(InMemoryRepository::new());
        let store = Arc::new(InMemoryBlobStore::new());
        let service = AttachmentService::new(
            repo.clone(),
            Arc::new(LosesDeleteRace {
                inner: repo.clone(),
            }),
            store.clone(),
            AttachmentConfig::default(),
        );
        let item = repo.seed_item("Drill");
        let mut reader = Cursor::new(b"x".to_vec());
        let created = service
            .create(item, meta("x", b"x"), &mut reader)
            .await
            .unwrap();

        let result = service.delete(item, created.id).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Attachment not found"));
        assert_eq!(repo.attachment_count(), 0);
        // The winning request owns the blob delete
        assert!(store.contains(&attachment_key(item, created.id)));
    }
}
