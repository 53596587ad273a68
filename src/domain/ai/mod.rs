//! AI provider domain: adapters, chain, retry/failover orchestration and probing

mod chain;
mod orchestrator;
mod prober;
mod provider;
mod provider_type;
mod request;
mod result;
mod retry;

pub use chain::ProviderChain;
pub use orchestrator::AiOrchestrator;
pub use prober::{AvailabilityProber, ProviderAvailability, any_available, probe_all};
pub use provider::AiProvider;
pub use provider_type::AiProviderType;
pub use request::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationRequest, GenerationRequestBuilder,
};
pub use result::{FALLBACK_PROVIDER_NAME, GenerationResult, UNAVAILABLE_NOTICE};
pub use retry::RetryPolicy;

#[cfg(test)]
pub use provider::mock;
