//! MinIO/S3-compatible blob store
//!
//! Uses rust-s3 for streaming object operations against a path-style
//! endpoint. Every object key is placed under the configured path prefix.

use async_trait::async_trait;
use futures::StreamExt;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, BucketConfiguration, Region};
use tokio::io::AsyncRead;
use tracing::{debug, info, warn};

use crate::core::config::S3Config;
use crate::core::error::AppError;
use crate::modules::storage::{BlobStore, BlobStream, StorageError};

/// S3-compatible storage client
pub struct S3BlobStore {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    path_prefix: String,
}

impl S3BlobStore {
    /// Create a new client from configuration
    pub fn new(config: S3Config) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create S3 credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create S3 bucket handle: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();
        bucket.set_request_timeout(Some(config.request_timeout));

        info!(
            "S3 client initialized for endpoint: {}, bucket: {}, prefix: '{}', timeout: {:?}",
            config.endpoint,
            bucket.name(),
            config.path_prefix,
            config.request_timeout
        );

        Ok(Self {
            bucket,
            region,
            credentials,
            endpoint: config.endpoint,
            path_prefix: config.path_prefix,
        })
    }

    /// Ensure the bucket exists, create if not
    pub async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        // Creating an existing bucket fails with a well-known code which is safe to ignore
        match Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await
        {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}' at {}: {}. Assuming it exists.",
                        self.bucket.name(),
                        self.endpoint,
                        e
                    );
                }
                Ok(())
            }
        }
    }

    /// Get the bucket name
    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    /// Full object path for `key` including the configured prefix
    fn object_path(&self, key: &str) -> String {
        if self.path_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.path_prefix, key)
        }
    }
}

fn map_s3_error(path: &str, error: S3Error) -> StorageError {
    match error {
        S3Error::HttpFailWithBody(404, _) => StorageError::NotFound(path.to_string()),
        other => StorageError::Backend(format!("'{}': {}", path, other)),
    }
}

fn check_status(path: &str, status: u16) -> Result<(), StorageError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(StorageError::NotFound(path.to_string())),
        other => Err(StorageError::Backend(format!(
            "'{}': unexpected status {}",
            path, other
        ))),
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        key: &str,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        content_type: &str,
    ) -> Result<u64, StorageError> {
        let path = self.object_path(key);
        let mut reader = reader;

        let response = self
            .bucket
            .put_object_stream_with_content_type(&mut reader, &path, content_type)
            .await
            .map_err(|e| map_s3_error(&path, e))?;

        check_status(&path, response.status_code()).map_err(|e| match e {
            // A 404 on PUT means the bucket is gone, not the object
            StorageError::NotFound(p) => StorageError::Backend(format!("'{}': bucket missing", p)),
            other => other,
        })?;

        debug!(
            "Uploaded '{}' ({} bytes) to bucket '{}'",
            path,
            response.uploaded_bytes(),
            self.bucket.name()
        );
        Ok(response.uploaded_bytes() as u64)
    }

    async fn get(&self, key: &str) -> Result<BlobStream, StorageError> {
        let path = self.object_path(key);

        let response = self
            .bucket
            .get_object_stream(&path)
            .await
            .map_err(|e| map_s3_error(&path, e))?;

        check_status(&path, response.status_code)?;

        debug!("Streaming '{}' from bucket '{}'", path, self.bucket.name());

        let stream = response
            .bytes
            .map(|chunk| chunk.map_err(|e| StorageError::Backend(e.to_string())));
        Ok(Box::pin(stream))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.object_path(key);

        // DeleteObject answers 204 whether or not the key existed
        let (_, head_status) = self
            .bucket
            .head_object(&path)
            .await
            .map_err(|e| map_s3_error(&path, e))?;
        check_status(&path, head_status)?;

        let response = self
            .bucket
            .delete_object(&path)
            .await
            .map_err(|e| map_s3_error(&path, e))?;

        check_status(&path, response.status_code())?;

        debug!("Deleted '{}' from bucket '{}'", path, self.bucket.name());
        Ok(())
    }
}
