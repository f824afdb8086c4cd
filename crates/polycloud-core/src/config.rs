//! Configuration module
//!
//! Environment-driven settings for the storage and vision backends. All
//! fields are optional at load time; each provider validates the fields it
//! needs when it is constructed, so unrelated backends never block each
//! other.

use std::env;

/// Backend configuration loaded from the process environment.
///
/// Credentials are never embedded in code. GCS additionally honors the
/// standard `GOOGLE_SERVICE_ACCOUNT` environment handled by the object
/// store builder itself.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Path to a GCS service account key file (`GOOGLE_SERVICE_ACCOUNT_PATH`).
    pub gcs_service_account_path: Option<String>,
    /// Huawei OBS access key id (`OBS_ACCESS_KEY_ID`).
    pub obs_access_key_id: Option<String>,
    /// Huawei OBS secret access key (`OBS_SECRET_ACCESS_KEY`).
    pub obs_secret_access_key: Option<String>,
    /// Huawei OBS endpoint, e.g. `obs.ap-southeast-1.myhuaweicloud.com`
    /// (`OBS_ENDPOINT`).
    pub obs_endpoint: Option<String>,
    /// Google Vision API key (`GOOGLE_VISION_API_KEY`).
    pub vision_api_key: Option<String>,
    /// Override for the Vision API base URL (`GOOGLE_VISION_ENDPOINT`).
    /// Defaults to the public endpoint; tests point this at a mock server.
    pub vision_endpoint: Option<String>,
}

impl Config {
    /// Load configuration from `.env` (if present) and the process
    /// environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            gcs_service_account_path: env::var("GOOGLE_SERVICE_ACCOUNT_PATH").ok(),
            obs_access_key_id: env::var("OBS_ACCESS_KEY_ID").ok(),
            obs_secret_access_key: env::var("OBS_SECRET_ACCESS_KEY").ok(),
            obs_endpoint: env::var("OBS_ENDPOINT").ok(),
            vision_api_key: env::var("GOOGLE_VISION_API_KEY").ok(),
            vision_endpoint: env::var("GOOGLE_VISION_ENDPOINT").ok(),
        }
    }
}
