//! Domain layer - Core business logic and entities

pub mod ai;
pub mod error;
pub mod precedent;

pub use ai::{
    AiOrchestrator, AiProvider, AiProviderType, AvailabilityProber, DEFAULT_MAX_TOKENS,
    DEFAULT_TEMPERATURE, GenerationRequest, GenerationResult, ProviderChain, RetryPolicy,
};
pub use error::DomainError;
pub use precedent::{Precedent, PrecedentPage, PrecedentQuery, PrecedentRepository};
