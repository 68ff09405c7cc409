//! Rendering service HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use pvid_models::{Product, VideoGenerationOptions, VideoGenerationResult};

use crate::error::{RenderError, RenderResult};
use crate::renderer::VideoRenderer;
use crate::retry::{retry_async, RetryConfig};

/// Path of the generation endpoint.
pub const GENERATE_PATH: &str = "/api/videos/generate";

/// Configuration for the rendering client.
#[derive(Debug, Clone)]
pub struct RenderClientConfig {
    /// Base URL of the rendering service
    pub base_url: String,
    /// Bearer token, if the service requires one
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Max retries for transient failures
    pub max_retries: u32,
    /// First backoff delay; doubles per retry
    pub retry_base_delay: Duration,
}

impl Default for RenderClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: None,
            timeout: Duration::from_secs(120), // rendering is slow
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl RenderClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("PVID_RENDER_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            api_key: std::env::var("PVID_RENDER_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            timeout: Duration::from_secs(
                std::env::var("PVID_RENDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
            max_retries: std::env::var("PVID_RENDER_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            retry_base_delay: Duration::from_millis(500),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_retries(mut self, max_retries: u32, base_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_base_delay = base_delay;
        self
    }
}

/// Body sent to the generation endpoint.
#[derive(Debug, Serialize)]
struct GenerateVideoRequest<'a> {
    product: &'a Product,
    options: &'a VideoGenerationOptions,
}

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP client for the rendering service.
pub struct RenderClient {
    http: Client,
    config: RenderClientConfig,
    retry: RetryConfig,
}

impl RenderClient {
    /// Create a new rendering client.
    pub fn new(config: RenderClientConfig) -> RenderResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(RenderError::config_error("rendering service URL is empty"));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RenderError::Network)?;

        let retry = RetryConfig::new("generate_video")
            .with_max_retries(config.max_retries)
            .with_base_delay(config.retry_base_delay);

        Ok(Self {
            http,
            config,
            retry,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> RenderResult<Self> {
        Self::new(RenderClientConfig::from_env())
    }

    pub fn config(&self) -> &RenderClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Check if the rendering service is healthy.
    pub async fn health_check(&self) -> RenderResult<bool> {
        let url = self.url("/health");

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let health: HealthResponse = response
                    .json()
                    .await
                    .map_err(|e| RenderError::InvalidResponse(e.to_string()))?;
                Ok(health.status == "healthy" || health.status == "ok")
            }
            Ok(response) => {
                warn!("Rendering service health check failed: {}", response.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Rendering service health check error: {}", e);
                Ok(false)
            }
        }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> RenderError {
        if e.is_timeout() {
            RenderError::Timeout(self.config.timeout.as_secs())
        } else {
            RenderError::Network(e)
        }
    }

    /// Turn a non-2xx response into an error carrying the service's message.
    async fn check_status(response: Response) -> RenderResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: ServiceErrorBody = serde_json::from_str(&body).unwrap_or_default();
        let message = parsed
            .error
            .or(parsed.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("Rendering service returned {}", status)
                } else {
                    body.trim().to_string()
                }
            });

        if status.is_server_error() {
            Err(RenderError::ServiceUnavailable(message))
        } else {
            Err(RenderError::RequestFailed(message))
        }
    }
}

#[async_trait]
impl VideoRenderer for RenderClient {
    async fn generate_video(
        &self,
        product: &Product,
        options: &VideoGenerationOptions,
    ) -> RenderResult<VideoGenerationResult> {
        let url = self.url(GENERATE_PATH);
        let body = GenerateVideoRequest { product, options };
        let request_id = Uuid::new_v4().to_string();

        debug!(
            request_id = %request_id,
            template = %options.template,
            "Sending video generation request to {}", url
        );

        let (url, body, request_id) = (url.as_str(), &body, request_id.as_str());
        let response = retry_async(&self.retry, RenderError::is_retryable, move || async move {
            let mut request = self
                .http
                .post(url)
                .header("X-Request-Id", request_id)
                .json(body);
            if let Some(key) = &self.config.api_key {
                request = request.bearer_auth(key);
            }

            let response = request
                .send()
                .await
                .map_err(|e| self.map_transport_error(e))?;
            Self::check_status(response).await
        })
        .await?;

        let result: VideoGenerationResult = response
            .json()
            .await
            .map_err(|e| RenderError::InvalidResponse(e.to_string()))?;

        info!(
            request_id = %request_id,
            status = %result.status,
            job_id = result.job_id.as_deref().unwrap_or("-"),
            "Video generation request finished"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn product() -> Product {
        Product::new(
            "Smart Watch",
            89.0,
            vec!["https://cdn.example.com/watch.jpg".to_string()],
        )
    }

    fn client_for(server: &MockServer) -> RenderClient {
        RenderClient::new(
            RenderClientConfig::default()
                .with_base_url(server.uri())
                .with_retries(2, Duration::from_millis(1)),
        )
        .unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = RenderClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_rejects_empty_base_url() {
        let result = RenderClient::new(RenderClientConfig::default().with_base_url(" "));
        assert!(matches!(result, Err(RenderError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_generate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(json!({
                "product": {"title": "Smart Watch"},
                "options": {"template": "flash-deal", "aspectRatio": "9:16"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "videoUrl": "https://x/y.mp4",
                "thumbnailUrl": "https://x/y.jpg",
                "jobId": "job-7"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = RenderClient::new(
            RenderClientConfig::default()
                .with_base_url(server.uri())
                .with_api_key("secret"),
        )
        .unwrap();

        let result = client
            .generate_video(&product(), &VideoGenerationOptions::default())
            .await
            .unwrap();

        assert!(result.is_success());
        assert_eq!(result.video_url.as_deref(), Some("https://x/y.mp4"));
        assert_eq!(result.job_id.as_deref(), Some("job-7"));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Template not found"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_video(&product(), &VideoGenerationOptions::new("missing"))
            .await
            .unwrap_err();

        assert!(matches!(err, RenderError::RequestFailed(_)));
        assert_eq!(err.message().as_deref(), Some("Template not found"));
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_video(&product(), &VideoGenerationOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, RenderError::ServiceUnavailable(_)));
        assert!(err.message().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_error_status_in_body_passes_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "errorMessage": "Image could not be fetched"
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate_video(&product(), &VideoGenerationOptions::default())
            .await
            .unwrap();

        assert!(!result.is_success());
        assert_eq!(result.error_message.as_deref(), Some("Image could not be fetched"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        assert!(client_for(&server).health_check().await.unwrap());
    }
}
