//! Storage service facade
//!
//! `StorageService` is what application code holds: it resolves a backend
//! from a provider identifier at construction, keeps the caller's current
//! bucket selection, and delegates each request to the backend unchanged.
//! Internal errors pass through without re-wrapping.

use crate::gcs::GcsStorage;
use crate::obs::ObsStorage;
use crate::traits::{ObjectStorage, StorageError, StorageResult};
use polycloud_core::{Config, ObjectDescriptor, StorageProviderId};
use std::path::Path;

/// Vendor-neutral storage service.
///
/// The bucket selection is a plain session value owned by this instance;
/// each logical workflow owns its own service. Mutation goes through
/// `&mut self`, so concurrent sharing is ruled out by the borrow checker
/// rather than by convention.
pub struct StorageService {
    provider: Box<dyn ObjectStorage>,
    bucket: Option<String>,
}

impl std::fmt::Debug for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageService")
            .field("provider", &self.provider.provider())
            .field("bucket", &self.bucket)
            .finish()
    }
}

impl StorageService {
    /// Build a service for the named provider ("gcp" or "huawei",
    /// case-insensitive). Unknown identifiers fail with `ProviderNotFound`
    /// before any backend call is attempted.
    pub fn new(identifier: &str, config: &Config) -> StorageResult<Self> {
        let id: StorageProviderId = identifier
            .parse()
            .map_err(|_| StorageError::ProviderNotFound(identifier.to_string()))?;

        let provider: Box<dyn ObjectStorage> = match id {
            StorageProviderId::Gcp => Box::new(GcsStorage::new(config)?),
            StorageProviderId::Huawei => Box::new(ObsStorage::new(config)?),
        };

        Ok(Self::with_provider(provider))
    }

    /// Build a service around an already-constructed backend.
    pub fn with_provider(provider: Box<dyn ObjectStorage>) -> Self {
        StorageService {
            provider,
            bucket: None,
        }
    }

    /// The provider this service is bound to.
    pub fn provider(&self) -> StorageProviderId {
        self.provider.provider()
    }

    /// Select the bucket used by subsequent storage operations. Pure local
    /// state, no I/O.
    pub fn set_bucket(&mut self, bucket: impl Into<String>) {
        self.bucket = Some(bucket.into());
    }

    /// The currently selected bucket, if any.
    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    pub async fn request_retrieve(&self, remote_path: &str) -> StorageResult<ObjectDescriptor> {
        let bucket = self.selected_bucket()?;
        self.provider.retrieve(bucket, remote_path).await
    }

    pub async fn request_upload(
        &self,
        remote_path: &str,
        local_path: impl AsRef<Path>,
    ) -> StorageResult<ObjectDescriptor> {
        let bucket = self.selected_bucket()?;
        self.provider
            .upload(bucket, remote_path, local_path.as_ref())
            .await
    }

    pub async fn request_delete(&self, remote_path: &str) -> StorageResult<ObjectDescriptor> {
        let bucket = self.selected_bucket()?;
        self.provider.delete(bucket, remote_path).await
    }

    fn selected_bucket(&self) -> StorageResult<&str> {
        self.bucket.as_deref().ok_or(StorageError::NoBucketSelected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::{load_local_file, BucketHandle};
    use async_trait::async_trait;
    use object_store::memory::InMemory;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// In-memory backend with a fixed set of resolvable buckets. Unknown
    /// buckets fail the same way an unresolvable GCS bucket does.
    struct MemoryStorage {
        buckets: HashMap<String, Arc<InMemory>>,
    }

    impl MemoryStorage {
        fn with_buckets(names: &[&str]) -> Self {
            let buckets = names
                .iter()
                .map(|name| (name.to_string(), Arc::new(InMemory::new())))
                .collect();
            MemoryStorage { buckets }
        }

        async fn handle(&self, bucket: &str) -> StorageResult<BucketHandle> {
            let store = self
                .buckets
                .get(bucket)
                .cloned()
                .ok_or_else(|| StorageError::BucketNotFound(bucket.to_string()))?;

            BucketHandle::resolve(
                store,
                bucket.to_string(),
                "gs",
                format!("https://storage.googleapis.com/{}", bucket),
                StorageProviderId::Gcp,
            )
            .await
        }
    }

    #[async_trait]
    impl ObjectStorage for MemoryStorage {
        async fn retrieve(
            &self,
            bucket: &str,
            remote_path: &str,
        ) -> StorageResult<ObjectDescriptor> {
            self.handle(bucket).await?.describe(remote_path).await
        }

        async fn upload(
            &self,
            bucket: &str,
            remote_path: &str,
            local_path: &std::path::Path,
        ) -> StorageResult<ObjectDescriptor> {
            let data = load_local_file(local_path).await?;
            self.handle(bucket).await?.put(remote_path, data).await
        }

        async fn delete(&self, bucket: &str, remote_path: &str) -> StorageResult<ObjectDescriptor> {
            self.handle(bucket).await?.remove(remote_path).await
        }

        fn provider(&self) -> StorageProviderId {
            StorageProviderId::Gcp
        }
    }

    fn memory_service(buckets: &[&str]) -> StorageService {
        StorageService::with_provider(Box::new(MemoryStorage::with_buckets(buckets)))
    }

    fn local_fixture(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn unknown_identifier_fails_with_provider_not_found() {
        let err = StorageService::new("abcde", &Config::default()).unwrap_err();
        assert!(matches!(err, StorageError::ProviderNotFound(_)), "got {err:?}");
        assert_eq!(err.to_string(), "provider abcde is not available");
    }

    #[test]
    fn gcp_identifier_is_case_insensitive() {
        let config = Config::default();
        for identifier in ["gcp", "GCP", "Gcp"] {
            let service = StorageService::new(identifier, &config).unwrap();
            assert_eq!(service.provider(), StorageProviderId::Gcp);
        }
    }

    #[test]
    fn huawei_without_credentials_is_a_config_error() {
        let err = StorageService::new("huawei", &Config::default()).unwrap_err();
        assert!(matches!(err, StorageError::Config(_)));
    }

    #[test]
    fn set_bucket_then_get_bucket_round_trips() {
        let mut service = memory_service(&["bucket-testing"]);
        assert_eq!(service.bucket(), None);

        service.set_bucket("bucket-testing");
        assert_eq!(service.bucket(), Some("bucket-testing"));

        service.set_bucket("bucket-testing2");
        assert_eq!(service.bucket(), Some("bucket-testing2"));
    }

    #[tokio::test]
    async fn operations_before_set_bucket_fail_explicitly() {
        let service = memory_service(&["bucket-testing"]);

        let err = service.request_retrieve("ex1/test.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::NoBucketSelected));
    }

    #[tokio::test]
    async fn upload_then_retrieve_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let local = local_fixture(&dir, "test.txt", b"hello");

        let mut service = memory_service(&["bucket-testing"]);
        service.set_bucket("bucket-testing");

        let uploaded = service.request_upload("ex1/test.txt", &local).await.unwrap();
        assert!(uploaded.exists);
        assert_eq!(uploaded.bucket, "bucket-testing");
        assert_eq!(uploaded.name, "ex1/test.txt");
        assert_eq!(uploaded.uri, "gs://bucket-testing/ex1/test.txt");
        assert_eq!(
            uploaded.public_url,
            "https://storage.googleapis.com/bucket-testing/ex1/test.txt"
        );

        let retrieved = service.request_retrieve("ex1/test.txt").await.unwrap();
        assert!(retrieved.exists);
        assert_eq!(retrieved.name, uploaded.name);
        assert_eq!(retrieved.uri, uploaded.uri);
    }

    #[tokio::test]
    async fn delete_returns_post_deletion_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let local = local_fixture(&dir, "test.txt", b"hello");

        let mut service = memory_service(&["bucket-testing"]);
        service.set_bucket("bucket-testing");
        service.request_upload("ex1/test.txt", &local).await.unwrap();

        let deleted = service.request_delete("ex1/test.txt").await.unwrap();
        assert!(!deleted.exists);
        assert_eq!(deleted.id, None);
        assert_eq!(deleted.bucket, "bucket-testing");
        assert_eq!(deleted.uri, "gs://bucket-testing/ex1/test.txt");

        let err = service.request_delete("ex1/test.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn unresolvable_bucket_is_bucket_not_found_never_file_not_found() {
        let mut service = memory_service(&["bucket-testing"]);
        service.set_bucket("no-such-bucket");

        let err = service.request_retrieve("ex1/test.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::BucketNotFound(_)), "got {err:?}");

        let err = service.request_delete("ex1/test.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::BucketNotFound(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn upload_missing_local_file_creates_no_remote_object() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let mut service = memory_service(&["bucket-testing"]);
        service.set_bucket("bucket-testing");

        let err = service.request_upload("ex1/test.txt", &missing).await.unwrap_err();
        assert!(matches!(err, StorageError::FileNotFound(_)));

        // Nothing was written remotely.
        let err = service.request_retrieve("ex1/test.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn descriptors_serialize_to_the_documented_shape() {
        let dir = tempfile::tempdir().unwrap();
        let local = local_fixture(&dir, "test.txt", b"hello");

        let mut service = memory_service(&["bucket-testing"]);
        service.set_bucket("bucket-testing");

        let uploaded = service.request_upload("ex1/test.txt", &local).await.unwrap();
        let json = serde_json::to_value(&uploaded).unwrap();
        assert_eq!(json["bucket"], "bucket-testing");
        assert_eq!(json["name"], "ex1/test.txt");
        assert_eq!(json["uri"], "gs://bucket-testing/ex1/test.txt");
        assert_eq!(json["exists"], true);

        let deleted = service.request_delete("ex1/test.txt").await.unwrap();
        let json = serde_json::to_value(&deleted).unwrap();
        assert_eq!(json["id"], serde_json::Value::Null);
        assert_eq!(json["exists"], false);
    }
}
