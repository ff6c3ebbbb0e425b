//! Storage module for attachment blobs
//!
//! `BlobStore` is the seam between the attachment pipeline and the object
//! store. `S3BlobStore` talks to MinIO or any S3-compatible service;
//! tests use `InMemoryBlobStore`.

mod blob_store;
#[cfg(test)]
mod memory;
mod s3_client;

pub use blob_store::{BlobStore, BlobStream, StorageError};
#[cfg(test)]
pub use memory::InMemoryBlobStore;
pub use s3_client::S3BlobStore;
