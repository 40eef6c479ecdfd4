//! HTTP client for the remote facial analysis service.
//!
//! One network attempt per call; retry is always a new user-initiated call.
//! Failures are classified into [`UploadError`] through reqwest's structured
//! error predicates, never by inspecting error message text.

pub mod image_prep;
pub mod types;

pub use types::{AnalysisReport, FeatureDetail, Point, Symmetry};

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::acquisition::ImageAsset;
use crate::error::UploadError;

/// Upper bound on the wait for any service call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default service location; overridden by the `api_base_url` preference.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client for the analysis service. Cheap to construct; commands build one
/// per invocation from the configured base URL.
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: &str) -> Result<Self, UploadError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Client with a caller-chosen wait bound. Production uses
    /// [`REQUEST_TIMEOUT`]; tests shorten it.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, UploadError> {
        Url::parse(base_url)
            .map_err(|e| UploadError::Unknown(format!("Invalid base URL '{}': {}", base_url, e)))?;

        let http = reqwest::Client::builder()
            .user_agent("NextFace/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::Unknown(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Upload one image and wait for its analysis.
    ///
    /// The payload is a single multipart part under field name `file`,
    /// content-type `image/jpeg`, re-encoded from the asset when needed.
    pub async fn submit(&self, asset: &ImageAsset) -> Result<AnalysisReport, UploadError> {
        let url = self.endpoint("/api/analyze-face");
        let payload = load_jpeg_payload(&asset.uri).await?;
        info!("Submitting {} byte payload to {}", payload.len(), url);

        let part = Part::bytes(payload)
            .file_name("photo.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| UploadError::Unknown(format!("Failed to build multipart body: {}", e)))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;
        if !status.is_success() {
            warn!("Analysis request failed with HTTP {}", status);
            return Err(UploadError::from_status(status.as_u16(), &body));
        }

        let report: AnalysisReport = serde_json::from_str(&body).map_err(|e| {
            warn!("Unreadable analysis response: {}", e);
            UploadError::MalformedResponse
        })?;
        info!("Analysis complete (confidence: {:?})", report.confidence);
        Ok(report)
    }

    /// Liveness probe. The body shape is the service's own and is passed
    /// through untouched.
    pub async fn health(&self) -> Result<Value, UploadError> {
        self.get_json("/health").await
    }

    /// Stored-analysis listing, raw JSON pass-through.
    pub async fn analysis_history(&self) -> Result<Value, UploadError> {
        self.get_json("/api/analysis-history").await
    }

    /// One stored analysis, raw JSON pass-through.
    pub async fn analysis(&self, analysis_id: &str) -> Result<Value, UploadError> {
        self.get_json(&format!("/api/analysis/{}", analysis_id)).await
    }

    /// Delete one stored analysis, raw JSON pass-through.
    pub async fn delete_analysis(&self, analysis_id: &str) -> Result<Value, UploadError> {
        let url = self.endpoint(&format!("/api/analysis/{}", analysis_id));
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(classify_transport)?;
        read_json(response).await
    }

    /// Consultation recommendations for a stored analysis, raw JSON
    /// pass-through.
    pub async fn consultation(&self, analysis_id: &str) -> Result<Value, UploadError> {
        self.get_json(&format!("/api/consultation/{}", analysis_id))
            .await
    }

    async fn get_json(&self, path: &str) -> Result<Value, UploadError> {
        let url = self.endpoint(path);
        let response = self.http.get(&url).send().await.map_err(classify_transport)?;
        read_json(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, UploadError> {
    let status = response.status();
    let body = response.text().await.map_err(classify_transport)?;
    if !status.is_success() {
        return Err(UploadError::from_status(status.as_u16(), &body));
    }
    serde_json::from_str(&body).map_err(|_| UploadError::MalformedResponse)
}

/// Read the asset bytes off the blocking pool and make sure they are JPEG.
///
/// A local read or decode failure is neither a network nor a server
/// condition, so it maps to `Unknown`.
async fn load_jpeg_payload(uri: &str) -> Result<Vec<u8>, UploadError> {
    let path = uri.to_string();
    tokio::task::spawn_blocking(move || {
        let bytes = std::fs::read(&path)
            .map_err(|e| format!("Failed to read image '{}': {}", path, e))?;
        image_prep::ensure_jpeg(bytes)
    })
    .await
    .map_err(|e| UploadError::Unknown(format!("Image task panicked: {}", e)))?
    .map_err(UploadError::Unknown)
}

/// Map a transport-level reqwest failure into the taxonomy.
///
/// Connection establishment is checked before the timeout predicate: a
/// request that never reached the service is `NetworkUnavailable` even when
/// it also ran out the clock.
fn classify_transport(err: reqwest::Error) -> UploadError {
    if err.is_connect() {
        UploadError::NetworkUnavailable
    } else if err.is_timeout() {
        UploadError::Timeout
    } else {
        UploadError::Unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let client = AnalysisClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.endpoint("/api/analyze-face"),
            "http://localhost:8000/api/analyze-face"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = AnalysisClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.endpoint("/health"), "http://localhost:8000/health");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = AnalysisClient::new("https://faces.example.com/v1").unwrap();
        assert_eq!(
            client.endpoint("/api/analyze-face"),
            "https://faces.example.com/v1/api/analyze-face"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = AnalysisClient::new("not a url");
        assert!(matches!(result, Err(UploadError::Unknown(_))));
    }

    #[tokio::test]
    async fn test_missing_asset_file_is_unknown() {
        let err = load_jpeg_payload("/nonexistent/photo1.jpg").await.unwrap_err();
        match err {
            UploadError::Unknown(msg) => assert!(msg.contains("Failed to read image")),
            other => panic!("expected Unknown, got {:?}", other),
        }
    }
}
