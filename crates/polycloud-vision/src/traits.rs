//! Vision abstraction trait

use async_trait::async_trait;
use polycloud_core::{LogoEntity, VisionProviderId, WebEntity};
use thiserror::Error;

/// Vision operation errors
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("provider {0} is not available")]
    ProviderNotFound(String),

    #[error("file object not found: {0}")]
    FileObjectNotFound(String),

    #[error("vision backend error: {0}")]
    Backend(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for vision operations
pub type VisionResult<T> = Result<T, VisionError>;

/// Vision abstraction trait
///
/// Each call performs exactly one outbound annotation request; there is no
/// caching or retrying, so repeated calls re-query the backend.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Detect web entities for the image at the given locator
    /// (e.g. a `gs://` URI).
    async fn detect_web(&self, uri: &str) -> VisionResult<Vec<WebEntity>>;

    /// Detect logos for the image at the given locator.
    async fn detect_logo(&self, uri: &str) -> VisionResult<Vec<LogoEntity>>;

    /// The provider this backend talks to.
    fn provider(&self) -> VisionProviderId;
}
