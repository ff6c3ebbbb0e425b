use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use tokio::io::AsyncRead;

/// Body of a stored object, yielded chunk by chunk
pub type BlobStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Key-addressed binary storage supporting streaming put/get and delete
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write everything `reader` yields to `key`, replacing any existing object.
    ///
    /// Returns the number of bytes stored.
    async fn put(
        &self,
        key: &str,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        content_type: &str,
    ) -> Result<u64, StorageError>;

    /// Open `key` for streaming. Fails with `StorageError::NotFound` when absent.
    async fn get(&self, key: &str) -> Result<BlobStream, StorageError>;

    /// Remove `key`. Fails with `StorageError::NotFound` when the store reports
    /// the object was already absent.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
