//! Storage abstraction trait
//!
//! This module defines the `ObjectStorage` trait that all storage backends
//! implement, along with the error taxonomy shared across them.

use async_trait::async_trait;
use polycloud_core::{ObjectDescriptor, StorageProviderId};
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("provider {0} is not available")]
    ProviderNotFound(String),

    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("no bucket selected")]
    NoBucketSelected,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (GCS, Huawei OBS) implement this trait. The bucket
/// is passed explicitly into every operation; backends hold no mutable
/// bucket state of their own.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Verify the object exists and return its normalized descriptor.
    ///
    /// No content is fetched; this is a metadata/existence round-trip only.
    async fn retrieve(&self, bucket: &str, remote_path: &str) -> StorageResult<ObjectDescriptor>;

    /// Upload the local file's contents to `remote_path` and return the
    /// descriptor for the uploaded object.
    ///
    /// The local file is checked before any remote call is made, so a
    /// missing source never leaves partial remote state.
    async fn upload(
        &self,
        bucket: &str,
        remote_path: &str,
        local_path: &Path,
    ) -> StorageResult<ObjectDescriptor>;

    /// Verify the object exists, delete it, and return the post-deletion
    /// descriptor (`exists == false`, `id == None`).
    async fn delete(&self, bucket: &str, remote_path: &str) -> StorageResult<ObjectDescriptor>;

    /// The provider this backend talks to.
    fn provider(&self) -> StorageProviderId;
}
