use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::chat_completion::{generation_body, parse_content, probe_body, system_message};
use super::http_client::{HttpClientTrait, cancellable};
use crate::config::OpenAiSettings;
use crate::domain::{AiProvider, DomainError, GenerationRequest};

const PROVIDER_NAME: &str = "OpenAI";

/// OpenAI chat-completions provider
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    model: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
    /// Fails with a configuration error when no API key is set
    pub fn new(client: C, settings: &OpenAiSettings) -> Result<Self, DomainError> {
        if settings.api_key.trim().is_empty() {
            return Err(DomainError::configuration(
                "OpenAI API key is not configured",
            ));
        }

        Ok(Self {
            client,
            auth_header: format!("Bearer {}", settings.api_key.trim()),
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

#[async_trait]
impl<C: HttpClientTrait> AiProvider for OpenAiProvider<C> {
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<String, DomainError> {
        debug!(model = %self.model, "Sending request to OpenAI");

        let system = system_message(request);
        let body = generation_body(Some(&self.model), &system, request);
        let url = self.chat_completions_url();

        let response = cancellable(cancel, self.client.post_json(&url, self.headers(), &body))
            .await
            .map_err(|e| e.with_provider(PROVIDER_NAME))?;

        let content = parse_content(PROVIDER_NAME, response)?;
        info!(response_len = content.len(), "OpenAI request completed");

        Ok(content)
    }

    async fn probe(&self, cancel: &CancellationToken) -> bool {
        let url = self.chat_completions_url();
        let body = probe_body(Some(&self.model));

        match cancellable(cancel, self.client.post_json(&url, self.headers(), &body)).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "OpenAI availability check failed");
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

    const TEST_URL: &str = "https://api.openai.com/v1/chat/completions";

    fn settings(api_key: &str) -> OpenAiSettings {
        OpenAiSettings {
            api_key: api_key.to_string(),
            ..Default::default()
        }
    }

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o-mini",
            "choices": [{
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let result = OpenAiProvider::new(MockHttpClient::new(), &settings("  "));
        assert!(result.unwrap_err().is_configuration());
    }

    #[tokio::test]
    async fn test_generate_sends_request_parameters() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion("Strategy text"));
        let provider = OpenAiProvider::new(client, &settings("sk-test")).unwrap();

        let request = GenerationRequest::builder("Tenant withheld rent")
            .temperature(0.2)
            .max_tokens(500)
            .build();
        let content = provider
            .generate(&request, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(content, "Strategy text");

        let sent = provider.client.requests();
        assert_eq!(sent.len(), 1);
        assert!(
            sent[0]
                .headers
                .contains(&("Authorization".to_string(), "Bearer sk-test".to_string()))
        );
        let body = sent[0].body.as_ref().unwrap();
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["model"], "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_generate_error_is_tagged_with_provider() {
        let client = MockHttpClient::new().with_status_error(TEST_URL, "invalid key", 401);
        let provider = OpenAiProvider::new(client, &settings("sk-bad")).unwrap();

        let err = provider
            .generate(&GenerationRequest::new("x"), &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            DomainError::Provider {
                provider,
                status_code,
                ..
            } => {
                assert_eq!(provider, "OpenAI");
                assert_eq!(status_code, Some(401));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_custom_base_url() {
        let custom_url = "http://localhost:9000/v1/chat/completions";
        let client = MockHttpClient::new().with_response(custom_url, completion("ok"));
        let provider = OpenAiProvider::new(
            client,
            &OpenAiSettings {
                api_key: "sk-test".to_string(),
                base_url: "http://localhost:9000/v1/".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        let content = provider
            .generate(&GenerationRequest::new("x"), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(content, "ok");
    }

    #[tokio::test]
    async fn test_probe_swallows_errors() {
        let client = MockHttpClient::new().with_error(TEST_URL, "connection refused");
        let provider = OpenAiProvider::new(client, &settings("sk-test")).unwrap();

        assert!(!provider.probe(&CancellationToken::new()).await);
    }

    #[tokio::test]
    async fn test_probe_sends_minimal_completion() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion("Hi"));
        let provider = OpenAiProvider::new(client, &settings("sk-test")).unwrap();

        assert!(provider.probe(&CancellationToken::new()).await);
        let body = provider.client.requests()[0].body.clone().unwrap();
        assert_eq!(body["max_tokens"], 10);
    }

    #[tokio::test]
    async fn test_cancelled_token_skips_request() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion("ok"));
        let provider = OpenAiProvider::new(client, &settings("sk-test")).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = provider
            .generate(&GenerationRequest::new("x"), &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(provider.client.requests().is_empty());
    }
}
