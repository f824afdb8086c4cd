//! Huawei OBS storage backend
//!
//! OBS speaks the S3 protocol, so the backend is built on `object_store`'s
//! S3 support pointed at the OBS endpoint. Credentials and endpoint come
//! from the environment via `Config`; nothing is embedded in code.

use crate::bucket::{load_local_file, BucketHandle};
use crate::traits::{ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::ObjectStore;
use polycloud_core::{Config, ObjectDescriptor, StorageProviderId};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ObsStorage {
    access_key_id: String,
    secret_access_key: String,
    /// Endpoint host, e.g. `obs.ap-southeast-1.myhuaweicloud.com`.
    endpoint: String,
}

impl ObsStorage {
    pub fn new(config: &Config) -> StorageResult<Self> {
        let access_key_id = config
            .obs_access_key_id
            .clone()
            .ok_or_else(|| StorageError::Config("OBS_ACCESS_KEY_ID not configured".to_string()))?;
        let secret_access_key = config.obs_secret_access_key.clone().ok_or_else(|| {
            StorageError::Config("OBS_SECRET_ACCESS_KEY not configured".to_string())
        })?;
        let endpoint = config
            .obs_endpoint
            .clone()
            .ok_or_else(|| StorageError::Config("OBS_ENDPOINT not configured".to_string()))?;

        Ok(ObsStorage {
            access_key_id,
            secret_access_key,
            endpoint,
        })
    }

    /// OBS endpoints embed the region as the second host label
    /// (`obs.{region}.myhuaweicloud.com`).
    fn region(&self) -> &str {
        self.endpoint.split('.').nth(1).unwrap_or("ap-southeast-1")
    }

    fn build_store(&self, bucket: &str) -> StorageResult<Arc<dyn ObjectStore>> {
        let store = AmazonS3Builder::new()
            .with_bucket_name(bucket)
            .with_region(self.region().to_string())
            .with_endpoint(format!("https://{}", self.endpoint))
            .with_access_key_id(self.access_key_id.clone())
            .with_secret_access_key(self.secret_access_key.clone())
            .build()
            .map_err(|e| StorageError::Config(e.to_string()))?;

        Ok(Arc::new(store))
    }

    async fn handle(&self, bucket: &str) -> StorageResult<BucketHandle> {
        let store = self.build_store(bucket)?;

        // OBS serves objects virtual-hosted: https://{bucket}.{endpoint}/{key}
        BucketHandle::resolve(
            store,
            bucket.to_string(),
            "obs",
            format!("https://{}.{}", bucket, self.endpoint),
            StorageProviderId::Huawei,
        )
        .await
    }
}

#[async_trait]
impl ObjectStorage for ObsStorage {
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
        StorageProviderId::Huawei
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_fail_construction() {
        let config = Config::default();
        let err = ObsStorage::new(&config).unwrap_err();
        assert!(matches!(err, StorageError::Config(_)));
    }

    #[test]
    fn region_is_taken_from_endpoint() {
        let config = Config {
            obs_access_key_id: Some("ak".to_string()),
            obs_secret_access_key: Some("sk".to_string()),
            obs_endpoint: Some("obs.ap-southeast-1.myhuaweicloud.com".to_string()),
            ..Config::default()
        };
        let storage = ObsStorage::new(&config).unwrap();
        assert_eq!(storage.region(), "ap-southeast-1");
    }
}
