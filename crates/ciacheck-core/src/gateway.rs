//! Port and HTTP adapter for the analysis backend.

use async_trait::async_trait;
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::{ConfigError, GatewayError};
use crate::model::{AnalysisRequest, AnalysisResponse};

/// Path of the analysis endpoint on the backend.
pub const ANALYZE_PATH: &str = "/analyze";

/// Sends one analysis request and decodes the answer.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, GatewayError>;
}

/// reqwest-backed gateway posting JSON to `{backend_url}/analyze`.
#[derive(Clone)]
pub struct HttpAnalysisGateway {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpAnalysisGateway {
    /// Build a gateway from configuration.
    ///
    /// A client timeout is only set when one is configured; otherwise the
    /// transport defaults apply.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            endpoint: format!("{}{}", config.backend_url.trim_end_matches('/'), ANALYZE_PATH),
            client,
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisGateway for HttpAnalysisGateway {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, GatewayError> {
        debug!(endpoint = %self.endpoint, test_type = %request.test_type, "Posting analysis request");

        let response = self.client.post(&self.endpoint).json(request).send().await?;

        // The backend reports its own errors with 4xx codes and an `error`
        // body, so the status is not checked before decoding.
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "Received analysis response");

        AnalysisResponse::from_json_str(&body)
    }
}
