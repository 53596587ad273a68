use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::http_client::{HttpClientTrait, cancellable};
use crate::config::PythonAiSettings;
use crate::domain::{AiProvider, DomainError, GenerationRequest};

const PROVIDER_NAME: &str = "PythonAI";
const HEALTHY: &str = "healthy";

/// Response of `POST /api/strategy`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResponse {
    pub strategy: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default, alias = "tokens_used")]
    pub tokens_used: Option<i64>,
    #[serde(default, alias = "processing_time")]
    pub processing_time: Option<f64>,
}

/// Response of `GET /api/health`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default, alias = "provider_available")]
    pub provider_available: bool,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case(HEALTHY) && self.provider_available
    }
}

/// Delegate that forwards the prompt to a separate AI microservice
#[derive(Debug)]
pub struct PythonAiProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> PythonAiProvider<C> {
    pub fn new(client: C, settings: &PythonAiSettings) -> Result<Self, DomainError> {
        let base_url = settings.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(DomainError::configuration(
                "Python AI service base URL is not configured",
            ));
        }

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn strategy_url(&self) -> String {
        format!("{}/api/strategy", self.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url)
    }

    pub async fn health(&self, cancel: &CancellationToken) -> Result<HealthResponse, DomainError> {
        let json = cancellable(cancel, self.client.get_json(&self.health_url(), vec![])).await?;

        serde_json::from_value(json).map_err(|e| {
            DomainError::provider(PROVIDER_NAME, format!("Invalid health response: {}", e))
        })
    }
}

#[async_trait]
impl<C: HttpClientTrait> AiProvider for PythonAiProvider<C> {
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<String, DomainError> {
        debug!("Sending strategy request to Python AI service");

        let body = serde_json::json!({ "caseDescription": request.prompt });

        let json = cancellable(
            cancel,
            self.client
                .post_json(&self.strategy_url(), vec![("Content-Type", "application/json")], &body),
        )
        .await
        .map_err(|e| e.with_provider(PROVIDER_NAME))?;

        let response: StrategyResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(
                PROVIDER_NAME,
                format!("Invalid response format from Python AI service: {}", e),
            )
        })?;

        if response.strategy.trim().is_empty() {
            return Err(DomainError::provider(
                PROVIDER_NAME,
                "Empty strategy received from Python AI service",
            ));
        }

        info!(
            upstream_provider = %response.provider,
            tokens_used = ?response.tokens_used,
            processing_time = ?response.processing_time,
            "Strategy received from Python AI service"
        );

        Ok(response.strategy)
    }

    async fn probe(&self, cancel: &CancellationToken) -> bool {
        match self.health(cancel).await {
            Ok(health) => {
                debug!(status = %health.status, provider_available = health.provider_available, "Python AI health");
                health.is_healthy()
            }
            Err(e) => {
                warn!(error = %e, "Python AI availability check failed");
                false
            }
        }
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}
