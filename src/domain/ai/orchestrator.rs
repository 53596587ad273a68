//! Retry and failover across the provider chain
//!
//! Providers are tried strictly in chain order and attempts strictly in sequence;
//! nothing races. Every attempt runs under its own cancellation scope derived from
//! the caller's token plus the per-attempt deadline. Only caller cancellation
//! escapes as an error: timeouts, provider errors and unexpected faults are all
//! counted as a failed attempt, and exhausting the chain yields the synthetic
//! notice.

use std::sync::Arc;

use metrics::counter;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::{
    AiProvider, FALLBACK_PROVIDER_NAME, GenerationRequest, GenerationResult, ProviderChain,
    RetryPolicy, UNAVAILABLE_NOTICE,
};
use crate::domain::DomainError;

/// Drives a [`ProviderChain`] with bounded retries and ordered failover
#[derive(Debug, Clone)]
pub struct AiOrchestrator {
    chain: ProviderChain,
    policy: RetryPolicy,
}

impl AiOrchestrator {
    pub fn new(chain: ProviderChain, policy: RetryPolicy) -> Self {
        Self { chain, policy }
    }

    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run the request against the chain.
    ///
    /// Always produces a result unless `cancel` fires, in which case
    /// `DomainError::Cancelled` is returned immediately and no further
    /// providers or attempts are tried.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, DomainError> {
        let start = Instant::now();
        let max_retries = self.policy.max_retries;

        for (index, provider) in self.chain.providers().iter().enumerate() {
            let is_from_fallback = index > 0;

            for attempt in 1..=max_retries {
                debug!(
                    provider = provider.name(),
                    attempt,
                    max_retries,
                    "Attempting generation"
                );

                match self.attempt(provider, request, cancel).await {
                    Ok(content) => {
                        let elapsed = start.elapsed();
                        record_attempt(provider.name(), "success");

                        info!(
                            provider = provider.name(),
                            attempt,
                            elapsed_ms = elapsed.as_millis() as u64,
                            is_from_fallback,
                            "Generation completed"
                        );

                        return Ok(GenerationResult::new(
                            content,
                            provider.name(),
                            elapsed,
                            is_from_fallback,
                        ));
                    }
                    Err(DomainError::Cancelled) => {
                        record_attempt(provider.name(), "cancelled");
                        warn!(provider = provider.name(), attempt, "Generation cancelled by caller");
                        return Err(DomainError::Cancelled);
                    }
                    Err(err @ DomainError::Timeout { .. }) => {
                        record_attempt(provider.name(), "timeout");
                        warn!(provider = provider.name(), attempt, error = %err, "Attempt timed out");
                    }
                    Err(err @ DomainError::Provider { .. }) => {
                        record_attempt(provider.name(), "error");
                        warn!(provider = provider.name(), attempt, error = %err, "Provider attempt failed");
                    }
                    Err(err) => {
                        record_attempt(provider.name(), "error");
                        error!(provider = provider.name(), attempt, error = %err, "Unexpected error from provider");
                    }
                }

                if self.policy.has_next_attempt(attempt) {
                    let delay = self.policy.backoff_for(attempt);
                    debug!(provider = provider.name(), delay_ms = delay.as_millis() as u64, "Retrying after backoff");

                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            warn!(provider = provider.name(), "Generation cancelled by caller during backoff");
                            return Err(DomainError::Cancelled);
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }

            warn!(provider = provider.name(), "All retry attempts exhausted for provider");
        }

        let elapsed = start.elapsed();
        error!(
            providers = ?self.chain.names(),
            elapsed_ms = elapsed.as_millis() as u64,
            "All AI providers failed, returning fallback notice"
        );

        Ok(GenerationResult::new(
            UNAVAILABLE_NOTICE,
            FALLBACK_PROVIDER_NAME,
            elapsed,
            true,
        ))
    }

    /// One attempt under a scope that inherits `cancel` and expires after the per-attempt timeout
    async fn attempt(
        &self,
        provider: &Arc<dyn AiProvider>,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<String, DomainError> {
        let scope = cancel.child_token();
        // Ends the scope on every exit path, including the deadline
        let _scope_guard = scope.clone().drop_guard();
        let timeout = self.policy.per_attempt_timeout;

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DomainError::Cancelled),
            outcome = tokio::time::timeout(timeout, provider.generate(request, &scope)) => outcome,
        };

        match outcome {
            Ok(Ok(content)) => Ok(content),
            Ok(Err(_)) if cancel.is_cancelled() => Err(DomainError::Cancelled),
            // The scope ended without the caller cancelling; the adapter gave up on its own deadline
            Ok(Err(DomainError::Cancelled)) => Err(DomainError::timeout(format!(
                "{} attempt scope ended before completion",
                provider.name()
            ))),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(DomainError::timeout(format!(
                "{} did not respond within {}s",
                provider.name(),
                timeout.as_secs()
            ))),
        }
    }
}

fn record_attempt(provider: &str, outcome: &'static str) {
    counter!(
        "ai_attempts_total",
        "provider" => provider.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ai::mock::{Scripted, ScriptedProvider};
    use std::time::Duration;

    fn chain_of(providers: &[Arc<ScriptedProvider>]) -> ProviderChain {
        ProviderChain::new(
            providers
                .iter()
                .map(|p| p.clone() as Arc<dyn AiProvider>)
                .collect(),
        )
        .unwrap()
    }

    fn request() -> GenerationRequest {
        GenerationRequest::builder("Analyze a breach of contract claim")
            .temperature(0.2)
            .max_tokens(500)
            .build()
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_provider_success_is_single_attempt() {
        let primary = Arc::new(ScriptedProvider::always_ok("PythonAI", "strategy"));
        let secondary = Arc::new(ScriptedProvider::always_ok("Mock", "unused"));
        let orchestrator =
            AiOrchestrator::new(chain_of(&[primary.clone(), secondary.clone()]), RetryPolicy::default());

        let result = orchestrator
            .generate(&request(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.content, "strategy");
        assert_eq!(result.provider_name, "PythonAI");
        assert!(!result.is_from_fallback);
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_failing_makes_n_times_r_attempts() {
        let providers: Vec<Arc<ScriptedProvider>> = ["PythonAI", "OpenAI", "Mock"]
            .into_iter()
            .map(|name| Arc::new(ScriptedProvider::always_failing(name)))
            .collect();
        let orchestrator = AiOrchestrator::new(chain_of(&providers), RetryPolicy::default());

        let result = orchestrator
            .generate(&request(), &CancellationToken::new())
            .await
            .unwrap();

        let total: usize = providers.iter().map(|p| p.calls()).sum();
        assert_eq!(total, 9);
        for provider in &providers {
            assert_eq!(provider.calls(), 3);
        }
        assert_eq!(result.provider_name, FALLBACK_PROVIDER_NAME);
        assert!(result.is_from_fallback);
        assert!(result.is_synthetic());
        assert_eq!(result.content, UNAVAILABLE_NOTICE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failover_to_second_provider() {
        let primary = Arc::new(ScriptedProvider::always_failing("OpenAI"));
        let secondary = Arc::new(ScriptedProvider::always_ok("Mock", "mock strategy"));
        let policy = RetryPolicy::new(2, Duration::from_secs(30));
        let orchestrator = AiOrchestrator::new(chain_of(&[primary.clone(), secondary.clone()]), policy);

        let result = orchestrator
            .generate(&request(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(primary.calls() + secondary.calls(), 3);
        assert_eq!(result.provider_name, "Mock");
        assert!(result.is_from_fallback);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_is_two_then_four_seconds() {
        let only = Arc::new(ScriptedProvider::always_failing("OpenAI"));
        let orchestrator = AiOrchestrator::new(chain_of(&[only.clone()]), RetryPolicy::default());

        let result = orchestrator
            .generate(&request(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(only.calls(), 3);
        assert!(result.elapsed >= Duration::from_secs(6));
        assert!(result.elapsed < Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_then_success_on_same_provider() {
        let provider = Arc::new(
            ScriptedProvider::new("AzureOpenAI")
                .then(Scripted::Fail("429 Too Many Requests".to_string()))
                .then(Scripted::Reply("second time lucky".to_string())),
        );
        let orchestrator = AiOrchestrator::new(chain_of(&[provider.clone()]), RetryPolicy::default());

        let result = orchestrator
            .generate(&request(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(provider.calls(), 2);
        assert_eq!(result.content, "second time lucky");
        assert!(!result.is_from_fallback);
        assert!(result.elapsed >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_timeout_counts_as_failure() {
        let hanging = Arc::new(ScriptedProvider::new("PythonAI").then(Scripted::Hang));
        let backup = Arc::new(ScriptedProvider::always_ok("Mock", "from mock"));
        let policy = RetryPolicy::new(2, Duration::from_secs(30));
        let orchestrator = AiOrchestrator::new(chain_of(&[hanging.clone(), backup.clone()]), policy);

        let result = orchestrator
            .generate(&request(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(hanging.calls(), 2);
        assert_eq!(result.provider_name, "Mock");
        assert!(result.is_from_fallback);
        // two 30s deadlines plus one 2s backoff
        assert!(result.elapsed >= Duration::from_secs(62));
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_covers_provider_latency() {
        let slow = Arc::new(
            ScriptedProvider::new("Mock")
                .then(Scripted::Slow(Duration::from_millis(1200), "done".to_string())),
        );
        let orchestrator = AiOrchestrator::new(chain_of(&[slow]), RetryPolicy::default());

        let result = orchestrator
            .generate(&request(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(!result.content.is_empty());
        assert!(result.elapsed >= Duration::from_millis(1200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_caller_cancellation_during_attempt_aborts_everything() {
        let hanging = Arc::new(ScriptedProvider::new("OpenAI").then(Scripted::Hang));
        let backup = Arc::new(ScriptedProvider::always_ok("Mock", "never"));
        let orchestrator =
            AiOrchestrator::new(chain_of(&[hanging.clone(), backup.clone()]), RetryPolicy::default());

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let result = orchestrator.generate(&request(), &cancel).await;

        assert!(matches!(result, Err(DomainError::Cancelled)));
        assert_eq!(hanging.calls(), 1);
        assert_eq!(backup.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_caller_cancellation_during_backoff() {
        let failing = Arc::new(ScriptedProvider::always_failing("OpenAI"));
        let backup = Arc::new(ScriptedProvider::always_ok("Mock", "never"));
        let orchestrator =
            AiOrchestrator::new(chain_of(&[failing.clone(), backup.clone()]), RetryPolicy::default());

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let result = orchestrator.generate(&request(), &cancel).await;

        assert!(matches!(result, Err(DomainError::Cancelled)));
        assert_eq!(failing.calls(), 1);
        assert_eq!(backup.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_token_makes_no_attempts() {
        let provider = Arc::new(ScriptedProvider::always_ok("Mock", "never"));
        let orchestrator = AiOrchestrator::new(chain_of(&[provider.clone()]), RetryPolicy::default());

        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = orchestrator.generate(&request(), &cancel).await;

        assert!(matches!(result, Err(DomainError::Cancelled)));
        assert_eq!(provider.calls(), 0);
    }
}
