//! Google Cloud Storage backend

use crate::bucket::{load_local_file, BucketHandle};
use crate::traits::{ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::ObjectStore;
use polycloud_core::{Config, ObjectDescriptor, StorageProviderId};
use std::path::Path;
use std::sync::Arc;

/// GCS storage backend
///
/// Stores are bucket-scoped in `object_store`, so one is built per
/// operation from the current bucket. Credentials come from the standard
/// GCS environment (service account path/key), optionally overridden by
/// `Config::gcs_service_account_path`.
#[derive(Clone)]
pub struct GcsStorage {
    service_account_path: Option<String>,
}

impl GcsStorage {
    pub fn new(config: &Config) -> StorageResult<Self> {
        Ok(GcsStorage {
            service_account_path: config.gcs_service_account_path.clone(),
        })
    }

    fn build_store(&self, bucket: &str) -> StorageResult<Arc<dyn ObjectStore>> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);

        if let Some(ref path) = self.service_account_path {
            builder = builder.with_service_account_path(path);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::Config(e.to_string()))?;

        Ok(Arc::new(store))
    }

    async fn handle(&self, bucket: &str) -> StorageResult<BucketHandle> {
        let store = self.build_store(bucket)?;

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
impl ObjectStorage for GcsStorage {
    async fn retrieve(&self, bucket: &str, remote_path: &str) -> StorageResult<ObjectDescriptor> {
        self.handle(bucket).await?.describe(remote_path).await
    }

    async fn upload(
        &self,
        bucket: &str,
        remote_path: &str,
        local_path: &Path,
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
