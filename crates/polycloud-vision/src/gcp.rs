//! Google Cloud Vision backend
//!
//! Talks to the `images:annotate` REST endpoint with the image referenced
//! by URI. The Vision API signals per-image failures out-of-band through an
//! `error` field on an otherwise successful HTTP response; that field is
//! translated to `FileObjectNotFound` here, before anything crosses the
//! backend boundary.

use crate::traits::{VisionError, VisionProvider, VisionResult};
use async_trait::async_trait;
use polycloud_core::{Config, LogoEntity, VisionProviderId, WebEntity};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://vision.googleapis.com";
const MAX_RESULTS: u32 = 50;

#[derive(Debug)]
pub struct GcpVision {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GcpVision {
    pub fn new(config: &Config) -> VisionResult<Self> {
        let api_key = config
            .vision_api_key
            .clone()
            .ok_or_else(|| VisionError::Config("GOOGLE_VISION_API_KEY not configured".to_string()))?;
        let base_url = config
            .vision_endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| VisionError::Config(e.to_string()))?;

        Ok(GcpVision {
            http_client,
            api_key,
            base_url,
        })
    }

    async fn annotate(&self, uri: &str, feature: &'static str) -> VisionResult<AnnotateImageResponse> {
        let url = format!(
            "{}/v1/images:annotate?key={}",
            self.base_url.trim_end_matches('/'),
            self.api_key
        );

        let request_body = json!({
            "requests": [{
                "image": { "source": { "imageUri": uri } },
                "features": [{ "type": feature, "maxResults": MAX_RESULTS }]
            }]
        });

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| VisionError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::error!(
                status = %status,
                feature = feature,
                uri = %uri,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "vision annotate request failed"
            );
            return Err(VisionError::Backend(format!("{} - {}", status, error_text)));
        }

        let annotate: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| VisionError::Backend(format!("malformed vision response: {}", e)))?;

        let first = annotate
            .responses
            .into_iter()
            .flatten()
            .next()
            .ok_or_else(|| VisionError::Backend("empty vision response".to_string()))?;

        if let Some(error) = first.error {
            return Err(VisionError::FileObjectNotFound(
                error.message.unwrap_or_else(|| "file object not found".to_string()),
            ));
        }

        tracing::info!(
            feature = feature,
            uri = %uri,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "vision annotate successful"
        );

        Ok(first)
    }
}

#[async_trait]
impl VisionProvider for GcpVision {
    async fn detect_web(&self, uri: &str) -> VisionResult<Vec<WebEntity>> {
        let response = self.annotate(uri, "WEB_DETECTION").await?;

        let entities = response
            .web_detection
            .and_then(|w| w.web_entities)
            .unwrap_or_default()
            .into_iter()
            .map(|entity| WebEntity {
                label: entity.description.unwrap_or_default(),
                score: entity.score.unwrap_or(0.0),
            })
            .collect();

        Ok(entities)
    }

    async fn detect_logo(&self, uri: &str) -> VisionResult<Vec<LogoEntity>> {
        let response = self.annotate(uri, "LOGO_DETECTION").await?;

        let logos = response
            .logo_annotations
            .unwrap_or_default()
            .into_iter()
            .map(|entity| LogoEntity {
                logo: entity.description.unwrap_or_default(),
                score: entity.score.unwrap_or(0.0),
            })
            .collect();

        Ok(logos)
    }

    fn provider(&self) -> VisionProviderId {
        VisionProviderId::Gcp
    }
}

// Google Cloud Vision API response types
#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    responses: Option<Vec<AnnotateImageResponse>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    web_detection: Option<WebDetection>,
    logo_annotations: Option<Vec<EntityAnnotation>>,
    error: Option<VisionApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebDetection {
    web_entities: Option<Vec<EntityAnnotation>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityAnnotation {
    description: Option<String>,
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct VisionApiError {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
}
