use std::sync::Arc;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{AiProvider, ProviderChain};

/// Availability of a single provider as reported by its probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAvailability {
    pub provider_name: String,
    pub available: bool,
}

/// Probe every provider concurrently and report each result in chain order
pub async fn probe_all(
    providers: &[Arc<dyn AiProvider>],
    cancel: &CancellationToken,
) -> Vec<ProviderAvailability> {
    let probes = providers.iter().map(|provider| async move {
        let available = provider.probe(cancel).await;
        debug!(provider = provider.name(), available, "Provider probe finished");

        ProviderAvailability {
            provider_name: provider.name().to_string(),
            available,
        }
    });

    join_all(probes).await
}

/// True iff at least one provider reports available; an empty list is unavailable
pub async fn any_available(providers: &[Arc<dyn AiProvider>], cancel: &CancellationToken) -> bool {
    if providers.is_empty() {
        return false;
    }

    probe_all(providers, cancel)
        .await
        .iter()
        .any(|result| result.available)
}

/// Fan-out liveness check over a provider chain, independent of generation
#[derive(Debug, Clone)]
pub struct AvailabilityProber {
    chain: ProviderChain,
}

impl AvailabilityProber {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }

    pub async fn is_available(&self, cancel: &CancellationToken) -> bool {
        any_available(self.chain.providers(), cancel).await
    }

    pub async fn check_all(&self, cancel: &CancellationToken) -> Vec<ProviderAvailability> {
        probe_all(self.chain.providers(), cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ai::mock::ScriptedProvider;

    fn provider(name: &str, available: bool) -> Arc<dyn AiProvider> {
        Arc::new(ScriptedProvider::new(name).with_availability(available))
    }

    #[tokio::test]
    async fn test_empty_provider_list_is_unavailable() {
        assert!(!any_available(&[], &CancellationToken::new()).await);
    }

    #[tokio::test]
    async fn test_any_available_provider_wins() {
        let providers = vec![provider("OpenAI", false), provider("Mock", true)];
        assert!(any_available(&providers, &CancellationToken::new()).await);
    }

    #[tokio::test]
    async fn test_all_unavailable() {
        let providers = vec![provider("OpenAI", false), provider("PythonAI", false)];
        assert!(!any_available(&providers, &CancellationToken::new()).await);
    }

    #[tokio::test]
    async fn test_check_all_reports_in_chain_order() {
        let chain = ProviderChain::new(vec![provider("PythonAI", false), provider("Mock", true)])
            .unwrap();
        let prober = AvailabilityProber::new(chain);

        let results = prober.check_all(&CancellationToken::new()).await;

        assert_eq!(
            results,
            vec![
                ProviderAvailability {
                    provider_name: "PythonAI".to_string(),
                    available: false
                },
                ProviderAvailability {
                    provider_name: "Mock".to_string(),
                    available: true
                },
            ]
        );
        assert!(prober.is_available(&CancellationToken::new()).await);
    }
}
