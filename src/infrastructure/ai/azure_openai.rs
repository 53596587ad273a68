use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::chat_completion::{generation_body, parse_content, probe_body, system_message};
use super::http_client::{HttpClientTrait, cancellable};
use crate::config::AzureSettings;
use crate::domain::{AiProvider, DomainError, GenerationRequest};

const PROVIDER_NAME: &str = "AzureOpenAI";

/// Azure OpenAI provider addressing a single deployment
#[derive(Debug)]
pub struct AzureOpenAiProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    url: String,
    deployment: String,
}

impl<C: HttpClientTrait> AzureOpenAiProvider<C> {
    pub fn new(client: C, settings: &AzureSettings) -> Result<Self, DomainError> {
        if settings.api_key.trim().is_empty() || settings.endpoint.trim().is_empty() {
            return Err(DomainError::configuration(
                "Azure OpenAI API key and endpoint are required",
            ));
        }

        if settings.deployment_name.trim().is_empty() {
            return Err(DomainError::configuration(
                "Azure OpenAI deployment name is required",
            ));
        }

        let deployment = settings.deployment_name.trim().to_string();
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            settings.endpoint.trim().trim_end_matches('/'),
            deployment,
            settings.api_version
        );

        Ok(Self {
            client,
            api_key: settings.api_key.trim().to_string(),
            url,
            deployment,
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("api-key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

#[async_trait]
impl<C: HttpClientTrait> AiProvider for AzureOpenAiProvider<C> {
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<String, DomainError> {
        debug!(deployment = %self.deployment, "Sending request to Azure OpenAI");

        let system = system_message(request);
        let body = generation_body(None, &system, request);

        let response = cancellable(cancel, self.client.post_json(&self.url, self.headers(), &body))
            .await
            .map_err(|e| e.with_provider(PROVIDER_NAME))?;

        let content = parse_content(PROVIDER_NAME, response)?;
        info!(response_len = content.len(), "Azure OpenAI request completed");

        Ok(content)
    }

    async fn probe(&self, cancel: &CancellationToken) -> bool {
        let body = probe_body(None);

        match cancellable(cancel, self.client.post_json(&self.url, self.headers(), &body)).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Azure OpenAI availability check failed");
                false
            }
        }
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ai::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://legal.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-06-01";

    fn settings() -> AzureSettings {
        AzureSettings {
            api_key: "azure-key".to_string(),
            endpoint: "https://legal.openai.azure.com/".to_string(),
            deployment_name: "gpt-4o".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_requires_key_endpoint_and_deployment() {
        let no_endpoint = AzureSettings {
            endpoint: String::new(),
            ..settings()
        };
        assert!(
            AzureOpenAiProvider::new(MockHttpClient::new(), &no_endpoint)
                .unwrap_err()
                .is_configuration()
        );

        let no_deployment = AzureSettings {
            deployment_name: " ".to_string(),
            ..settings()
        };
        assert!(
            AzureOpenAiProvider::new(MockHttpClient::new(), &no_deployment)
                .unwrap_err()
                .is_configuration()
        );
    }

    #[tokio::test]
    async fn test_generate_uses_deployment_url_and_api_key_header() {
        let response = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Azure strategy"}}]
        });
        let client = MockHttpClient::new().with_response(TEST_URL, response);
        let provider = AzureOpenAiProvider::new(client, &settings()).unwrap();

        let content = provider
            .generate(&GenerationRequest::new("x"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(content, "Azure strategy");
        let sent = provider.client.requests();
        assert!(
            sent[0]
                .headers
                .contains(&("api-key".to_string(), "azure-key".to_string()))
        );
        assert!(sent[0].body.as_ref().unwrap().get("model").is_none());
    }

    #[tokio::test]
    async fn test_empty_content_is_provider_error() {
        let response = serde_json::json!({"choices": [{"message": {"content": ""}}]});
        let client = MockHttpClient::new().with_response(TEST_URL, response);
        let provider = AzureOpenAiProvider::new(client, &settings()).unwrap();

        let err = provider
            .generate(&GenerationRequest::new("x"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Provider { ref provider, .. } if provider == "AzureOpenAI"));
    }

    #[tokio::test]
    async fn test_probe_reports_failure_as_false() {
        let client = MockHttpClient::new().with_status_error(TEST_URL, "throttled", 429);
        let provider = AzureOpenAiProvider::new(client, &settings()).unwrap();

        assert!(!provider.probe(&CancellationToken::new()).await);
    }
}
