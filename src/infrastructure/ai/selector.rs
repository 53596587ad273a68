use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::{AiProviderFactory, MockAiProvider};
use crate::config::AiConfig;
use crate::domain::{AiProvider, AiProviderType, DomainError, ProviderChain};

/// Resolve the configured primary provider plus fallbacks into an ordered chain.
///
/// Runs once at startup. Unconfigured providers are omitted; the chain always
/// ends up with at least the Mock stub.
pub fn build_provider_chain(config: &AiConfig) -> ProviderChain {
    let primary = match config.provider.parse::<AiProviderType>() {
        Ok(provider_type) => Some(provider_type),
        Err(e) => {
            warn!(error = %e, "Ignoring unknown primary AI provider");
            None
        }
    };

    let chain = assemble_chain(primary, config.enable_fallback, |provider_type| {
        AiProviderFactory::create(provider_type, config)
    });

    info!(providers = ?chain.names(), "AI provider chain initialized");
    chain
}

/// Chain assembly over an arbitrary constructor.
///
/// Configuration errors drop the provider. Any other error abandons the partial
/// chain and leaves the Mock stub alone.
pub fn assemble_chain<F>(
    primary: Option<AiProviderType>,
    enable_fallback: bool,
    create: F,
) -> ProviderChain
where
    F: Fn(AiProviderType) -> Result<Arc<dyn AiProvider>, DomainError>,
{
    match try_assemble(primary, enable_fallback, &create) {
        Ok(providers) => ProviderChain::new(providers).unwrap_or_else(|_| mock_only()),
        Err(e) => {
            error!(error = %e, "AI provider chain assembly failed, using Mock provider only");
            mock_only()
        }
    }
}

fn try_assemble<F>(
    primary: Option<AiProviderType>,
    enable_fallback: bool,
    create: &F,
) -> Result<Vec<Arc<dyn AiProvider>>, DomainError>
where
    F: Fn(AiProviderType) -> Result<Arc<dyn AiProvider>, DomainError>,
{
    let mut order: Vec<AiProviderType> = primary.into_iter().collect();

    if enable_fallback || primary.is_none() {
        order.extend(
            AiProviderType::FALLBACK_ORDER
                .into_iter()
                .filter(|t| Some(*t) != primary),
        );
    }

    let mut providers: Vec<Arc<dyn AiProvider>> = Vec::with_capacity(order.len());

    for provider_type in order {
        match create(provider_type) {
            Ok(provider) => providers.push(provider),
            Err(e) if e.is_configuration() => {
                debug!(provider = %provider_type, reason = %e, "AI provider unavailable, omitted");
            }
            Err(e) => return Err(e),
        }
    }

    if providers.is_empty() {
        warn!("No AI providers could be constructed, appending Mock provider");
        providers.push(Arc::new(MockAiProvider::new()));
    }

    Ok(providers)
}

fn mock_only() -> ProviderChain {
    ProviderChain::single(Arc::new(MockAiProvider::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ai::mock::ScriptedProvider;

    fn scripted(provider_type: AiProviderType) -> Result<Arc<dyn AiProvider>, DomainError> {
        Ok(Arc::new(ScriptedProvider::always_ok(provider_type.as_str(), "ok")))
    }

    #[test]
    fn test_no_credentials_yields_only_mock() {
        let chain = build_provider_chain(&AiConfig::default());
        assert_eq!(chain.names(), vec!["Mock".to_string()]);
    }

    #[test]
    fn test_primary_first_then_fixed_fallback_order() {
        let chain = assemble_chain(Some(AiProviderType::AzureOpenAI), true, scripted);

        assert_eq!(
            chain.names(),
            vec!["AzureOpenAI", "PythonAI", "OpenAI", "Mock"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_fallback_disabled_keeps_primary_only() {
        let chain = assemble_chain(Some(AiProviderType::OpenAI), false, scripted);
        assert_eq!(chain.names(), vec!["OpenAI".to_string()]);
    }

    #[test]
    fn test_unconfigured_primary_without_fallback_falls_back_to_mock() {
        let chain = assemble_chain(Some(AiProviderType::OpenAI), false, |_| {
            Err(DomainError::configuration("missing key"))
        });
        assert_eq!(chain.names(), vec!["Mock".to_string()]);
    }

    #[test]
    fn test_unconfigured_providers_are_omitted() {
        let chain = assemble_chain(Some(AiProviderType::OpenAI), true, |t| match t {
            AiProviderType::PythonAI | AiProviderType::AzureOpenAI => {
                Err(DomainError::configuration("missing"))
            }
            other => scripted(other),
        });

        assert_eq!(
            chain.names(),
            vec!["OpenAI".to_string(), "Mock".to_string()]
        );
    }

    #[test]
    fn test_unexpected_failure_replaces_chain_with_mock() {
        let chain = assemble_chain(Some(AiProviderType::OpenAI), true, |t| match t {
            AiProviderType::AzureOpenAI => Err(DomainError::internal("tls backend unavailable")),
            other => scripted(other),
        });

        assert_eq!(chain.names(), vec!["Mock".to_string()]);
    }

    #[test]
    fn test_unknown_primary_still_resolves_chain() {
        let config = AiConfig {
            provider: "Gemini".to_string(),
            enable_fallback: false,
            ..Default::default()
        };

        let chain = build_provider_chain(&config);
        assert_eq!(chain.names(), vec!["Mock".to_string()]);
    }
}
