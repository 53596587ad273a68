use std::sync::Arc;
use std::time::Duration;

use super::http_client::HttpClient;
use super::{AzureOpenAiProvider, MockAiProvider, OpenAiProvider, PythonAiProvider};
use crate::config::AiConfig;
use crate::domain::{AiProvider, AiProviderType, DomainError};

/// Factory for creating AI providers
#[derive(Debug)]
pub struct AiProviderFactory;

impl AiProviderFactory {
    /// Create a provider of the given type from configuration.
    ///
    /// Missing credentials or endpoints yield `DomainError::Configuration`; any
    /// other error means construction failed unexpectedly.
    pub fn create(
        provider_type: AiProviderType,
        config: &AiConfig,
    ) -> Result<Arc<dyn AiProvider>, DomainError> {
        match provider_type {
            AiProviderType::Mock => Ok(Arc::new(MockAiProvider::new())),

            AiProviderType::OpenAI => {
                let provider = OpenAiProvider::new(HttpClient::new(), &config.openai)?;
                Ok(Arc::new(provider))
            }

            AiProviderType::AzureOpenAI => {
                let provider = AzureOpenAiProvider::new(HttpClient::new(), &config.azure)?;
                Ok(Arc::new(provider))
            }

            AiProviderType::PythonAI => {
                if config.python_ai.base_url.trim().is_empty() {
                    return Err(DomainError::configuration(
                        "Python AI service base URL is not configured",
                    ));
                }

                let timeout = Duration::from_secs(config.python_ai.timeout_seconds.max(1));
                let client = HttpClient::with_timeout(timeout)?;
                let provider = PythonAiProvider::new(client, &config.python_ai)?;
                Ok(Arc::new(provider))
            }
        }
    }
}
