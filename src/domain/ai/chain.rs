use std::sync::Arc;

use super::AiProvider;
use crate::domain::DomainError;

/// Ordered, immutable list of providers tried for every request
///
/// Cloning is cheap; all clones share the same adapters. A chain always holds
/// at least one provider.
#[derive(Debug, Clone)]
pub struct ProviderChain {
    providers: Arc<[Arc<dyn AiProvider>]>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn AiProvider>>) -> Result<Self, DomainError> {
        if providers.is_empty() {
            return Err(DomainError::configuration(
                "Provider chain requires at least one provider",
            ));
        }

        Ok(Self {
            providers: providers.into(),
        })
    }

    pub fn single(provider: Arc<dyn AiProvider>) -> Self {
        Self {
            providers: Arc::from(vec![provider]),
        }
    }

    pub fn providers(&self) -> &[Arc<dyn AiProvider>] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn primary(&self) -> &Arc<dyn AiProvider> {
        &self.providers[0]
    }

    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ai::mock::ScriptedProvider;

    #[test]
    fn test_empty_chain_rejected() {
        let result = ProviderChain::new(Vec::new());
        assert!(result.unwrap_err().is_configuration());
    }

    #[test]
    fn test_chain_preserves_order() {
        let chain = ProviderChain::new(vec![
            Arc::new(ScriptedProvider::new("PythonAI")),
            Arc::new(ScriptedProvider::new("Mock")),
        ])
        .unwrap();

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.primary().name(), "PythonAI");
        assert_eq!(chain.names(), vec!["PythonAI", "Mock"]);
    }

    #[test]
    fn test_clones_share_providers() {
        let chain = ProviderChain::single(Arc::new(ScriptedProvider::new("Mock")));
        let clone = chain.clone();

        assert!(Arc::ptr_eq(&chain.providers()[0], &clone.providers()[0]));
    }
}
