//! Panel-side access to the proxy, with canned fallback

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{InsightsError, Result};
use crate::fallback::canned_response;
use crate::service::InsightsService;
use crate::types::{InsightRequest, InsightResponse};

/// How a request reaches the proxy
#[async_trait]
pub trait InsightsTransport: Send + Sync {
    async fn send(&self, request: &InsightRequest) -> Result<InsightResponse>;
}

/// Calls `POST {base_url}/api/ai-insights` over HTTP
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            endpoint: format!("{}/api/ai-insights", base_url.as_ref().trim_end_matches('/')),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

#[async_trait]
impl InsightsTransport for HttpTransport {
    async fn send(&self, request: &InsightRequest) -> Result<InsightResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| InsightsError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(InsightsError::Proxy {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<InsightResponse>()
            .await
            .map_err(|e| InsightsError::Decode(e.to_string()))
    }
}

/// In-process transport: the server's own handlers use the service directly
#[async_trait]
impl InsightsTransport for InsightsService {
    async fn send(&self, request: &InsightRequest) -> Result<InsightResponse> {
        self.generate(request.clone()).await
    }
}

/// Result of asking for an insight
#[derive(Debug, Clone)]
pub struct InsightOutcome {
    pub response: String,
    /// Set when `response` is the canned fallback
    pub error: Option<String>,
}

impl InsightOutcome {
    pub fn fell_back(&self) -> bool {
        self.error.is_some()
    }
}

/// Client used by panels; never fails, falls back to canned text
#[derive(Clone)]
pub struct InsightsClient {
    transport: Arc<dyn InsightsTransport>,
}

impl InsightsClient {
    pub fn new(transport: Arc<dyn InsightsTransport>) -> Self {
        Self { transport }
    }

    pub fn http(base_url: impl AsRef<str>) -> Self {
        Self::new(Arc::new(HttpTransport::new(base_url)))
    }

    pub async fn ask(&self, request: InsightRequest) -> InsightOutcome {
        match self.transport.send(&request).await {
            Ok(response) => InsightOutcome {
                response: response.response,
                error: None,
            },
            Err(e) => {
                tracing::error!(
                    insight_type = %request.insight_type,
                    error = %e,
                    "insight request failed, using canned response"
                );
                InsightOutcome {
                    response: canned_response(request.insight_type).to_string(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
