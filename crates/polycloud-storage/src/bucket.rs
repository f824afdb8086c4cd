//! Bucket-bound operation handle
//!
//! A `BucketHandle` carries one resolved bucket on one backend store and
//! performs the single vendor call behind each storage operation. All
//! vendor-error translation happens here: a failed bucket probe becomes
//! `BucketNotFound`, a missing object becomes `FileNotFound`, and any other
//! backend failure becomes `Backend`. Callers above this module only ever
//! see the internal taxonomy.

use crate::traits::{StorageError, StorageResult};
use bytes::Bytes;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectMeta, ObjectStore, ObjectStoreExt, PutPayload};
use polycloud_core::{ObjectDescriptor, StorageProviderId};
use std::sync::Arc;

pub(crate) struct BucketHandle {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    uri_scheme: &'static str,
    /// Base URL that already addresses the bucket, e.g.
    /// `https://storage.googleapis.com/bucket-testing`.
    public_base: String,
    provider: StorageProviderId,
}

impl BucketHandle {
    /// Resolve a bucket on the given store.
    ///
    /// Probes the bucket with a single delimited list so that an
    /// unresolvable bucket surfaces as `BucketNotFound` before any object
    /// operation is attempted, never as `FileNotFound`.
    pub(crate) async fn resolve(
        store: Arc<dyn ObjectStore>,
        bucket: String,
        uri_scheme: &'static str,
        public_base: String,
        provider: StorageProviderId,
    ) -> StorageResult<Self> {
        store.list_with_delimiter(None).await.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::BucketNotFound(bucket.clone()),
            other => {
                tracing::error!(
                    error = %other,
                    provider = %provider,
                    bucket = %bucket,
                    "bucket probe failed"
                );
                StorageError::Backend(other.to_string())
            }
        })?;

        Ok(BucketHandle {
            store,
            bucket,
            uri_scheme,
            public_base,
            provider,
        })
    }

    /// Verify the object exists and build its descriptor. Metadata only.
    pub(crate) async fn describe(&self, remote_path: &str) -> StorageResult<ObjectDescriptor> {
        let location = Path::from(remote_path);
        let meta = self.head(&location, remote_path).await?;

        Ok(self.live_descriptor(&meta))
    }

    /// Upload a payload to the given object path and return the descriptor
    /// for the now-existing object, built from a fresh existence check.
    pub(crate) async fn put(
        &self,
        remote_path: &str,
        data: Bytes,
    ) -> StorageResult<ObjectDescriptor> {
        let size = data.len() as u64;
        let location = Path::from(remote_path);
        let start = std::time::Instant::now();

        self.store
            .put(&location, PutPayload::from(data))
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    provider = %self.provider,
                    bucket = %self.bucket,
                    key = %remote_path,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "upload failed"
                );
                StorageError::Backend(e.to_string())
            })?;

        let meta = self.head(&location, remote_path).await?;

        tracing::info!(
            provider = %self.provider,
            bucket = %self.bucket,
            key = %remote_path,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "upload successful"
        );

        Ok(self.live_descriptor(&meta))
    }

    /// Verify the object exists, delete it, and return the post-deletion
    /// descriptor. The backend-assigned id does not survive deletion.
    pub(crate) async fn remove(&self, remote_path: &str) -> StorageResult<ObjectDescriptor> {
        let location = Path::from(remote_path);
        let start = std::time::Instant::now();

        let meta = self.head(&location, remote_path).await?;

        self.store.delete(&location).await.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::FileNotFound(remote_path.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    provider = %self.provider,
                    bucket = %self.bucket,
                    key = %remote_path,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "delete failed"
                );
                StorageError::Backend(other.to_string())
            }
        })?;

        tracing::info!(
            provider = %self.provider,
            bucket = %self.bucket,
            key = %remote_path,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "delete successful"
        );

        let name = meta.location.to_string();
        Ok(ObjectDescriptor {
            id: None,
            bucket: self.bucket.clone(),
            uri: self.uri(&name),
            public_url: self.public_url(&name),
            name,
            exists: false,
        })
    }

    async fn head(&self, location: &Path, remote_path: &str) -> StorageResult<ObjectMeta> {
        self.store.head(location).await.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::FileNotFound(remote_path.to_string()),
            other => StorageError::Backend(other.to_string()),
        })
    }

    fn live_descriptor(&self, meta: &ObjectMeta) -> ObjectDescriptor {
        let name = meta.location.to_string();
        ObjectDescriptor {
            // GCS reports the numeric object generation as the version.
            id: meta.version.as_deref().and_then(|v| v.parse().ok()),
            bucket: self.bucket.clone(),
            uri: self.uri(&name),
            public_url: self.public_url(&name),
            name,
            exists: true,
        }
    }

    fn uri(&self, name: &str) -> String {
        format!("{}://{}/{}", self.uri_scheme, self.bucket, name)
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.public_base.trim_end_matches('/'), name)
    }
}

/// Read an upload source from the local filesystem.
///
/// A missing source is a `FileNotFound`, raised before any remote call so
/// that a failed upload never creates partial remote state.
pub(crate) async fn load_local_file(local_path: &std::path::Path) -> StorageResult<Bytes> {
    match tokio::fs::read(local_path).await {
        Ok(data) => Ok(Bytes::from(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(StorageError::FileNotFound(local_path.display().to_string()))
        }
        Err(e) => Err(StorageError::Io(e)),
    }
}
