//! Vision service facade

use crate::gcp::GcpVision;
use crate::traits::{VisionError, VisionProvider, VisionResult};
use polycloud_core::{Config, LogoEntity, VisionProviderId, WebEntity};

/// Vendor-neutral vision service.
///
/// Resolves a backend from a provider identifier at construction and
/// delegates detection requests unchanged; internal errors pass through
/// without re-wrapping.
pub struct VisionService {
    provider: Box<dyn VisionProvider>,
}

impl std::fmt::Debug for VisionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionService")
            .field("provider", &self.provider.provider())
            .finish()
    }
}

impl VisionService {
    /// Build a service for the named provider ("gcp", case-insensitive).
    /// Unknown identifiers fail with `ProviderNotFound` before any backend
    /// call is attempted.
    pub fn new(identifier: &str, config: &Config) -> VisionResult<Self> {
        let id: VisionProviderId = identifier
            .parse()
            .map_err(|_| VisionError::ProviderNotFound(identifier.to_string()))?;

        let provider: Box<dyn VisionProvider> = match id {
            VisionProviderId::Gcp => Box::new(GcpVision::new(config)?),
        };

        Ok(Self::with_provider(provider))
    }

    /// Build a service around an already-constructed backend.
    pub fn with_provider(provider: Box<dyn VisionProvider>) -> Self {
        VisionService { provider }
    }

    /// The provider this service is bound to.
    pub fn provider(&self) -> VisionProviderId {
        self.provider.provider()
    }

    pub async fn request_web_detection(&self, uri: &str) -> VisionResult<Vec<WebEntity>> {
        self.provider.detect_web(uri).await
    }

    pub async fn request_logo_detection(&self, uri: &str) -> VisionResult<Vec<LogoEntity>> {
        self.provider.detect_logo(uri).await
    }
}
