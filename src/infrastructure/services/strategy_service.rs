//! Strategy service - Legal strategy generation on top of the AI orchestrator

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::config::OpenAiSettings;
use crate::domain::ai::ProviderAvailability;
use crate::domain::{
    AiOrchestrator, AvailabilityProber, DomainError, GenerationRequest, GenerationResult,
};
use crate::infrastructure::observability::record_ai_generation;

pub const MAX_CASE_DESCRIPTION_LEN: usize = 10_000;

const STRATEGY_SYSTEM_PROMPT: &str = r#"You are an expert legal strategy advisor AI. Your role is to provide comprehensive legal analysis and strategic recommendations.

Guidelines:
- Provide structured, actionable legal strategies
- Include relevant legal precedents and case law
- Identify potential risks and mitigation strategies
- Suggest next steps and action items
- Use professional legal terminology appropriately
- Format responses with clear sections and bullet points
- Always include disclaimers about the need for qualified legal counsel

Focus areas:
- Case analysis and legal theory
- Procedural strategy and timeline
- Evidence gathering and preservation
- Risk assessment and mitigation
- Settlement considerations
- Litigation strategy if applicable"#;

/// Entry point for strategy generation, free-form analysis and availability checks
#[derive(Debug, Clone)]
pub struct StrategyService {
    orchestrator: AiOrchestrator,
    prober: AvailabilityProber,
    temperature: f32,
    max_tokens: u32,
}

impl StrategyService {
    /// Strategy requests inherit temperature and max tokens from the OpenAI settings
    pub fn new(orchestrator: AiOrchestrator, prober: AvailabilityProber, defaults: &OpenAiSettings) -> Self {
        Self {
            orchestrator,
            prober,
            temperature: defaults.temperature.clamp(0.0, 2.0),
            max_tokens: defaults.max_tokens.max(1),
        }
    }

    pub fn strategy_request(&self, case_description: &str) -> Result<GenerationRequest, DomainError> {
        let description = case_description.trim();

        if description.is_empty() {
            return Err(DomainError::validation("Case description cannot be empty"));
        }

        if description.chars().count() > MAX_CASE_DESCRIPTION_LEN {
            return Err(DomainError::validation(format!(
                "Case description cannot exceed {} characters",
                MAX_CASE_DESCRIPTION_LEN
            )));
        }

        Ok(GenerationRequest::builder(format!(
            "Analyze this legal matter and provide a comprehensive strategy:\n\n{}",
            description
        ))
        .system_prompt(STRATEGY_SYSTEM_PROMPT)
        .temperature(self.temperature)
        .max_tokens(self.max_tokens)
        .build())
    }

    /// Generate a strategy narrative for a case description
    #[instrument(skip(self, case_description, cancel), fields(description_len = case_description.len()))]
    pub async fn generate_strategy(
        &self,
        case_description: &str,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, DomainError> {
        let request = self.strategy_request(case_description)?;
        self.run(&request, cancel).await
    }

    /// Run an arbitrary generation request through the provider chain
    #[instrument(skip(self, request, cancel), fields(prompt_len = request.prompt.len()))]
    pub async fn analyze(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, DomainError> {
        request.validate()?;
        self.run(request, cancel).await
    }

    pub async fn is_available(&self, cancel: &CancellationToken) -> bool {
        self.prober.is_available(cancel).await
    }

    pub async fn provider_availability(&self, cancel: &CancellationToken) -> Vec<ProviderAvailability> {
        self.prober.check_all(cancel).await
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.orchestrator.chain().names()
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, DomainError> {
        let result = self.orchestrator.generate(request, cancel).await?;

        record_ai_generation(&result.provider_name, result.is_from_fallback, result.elapsed);
        info!(
            provider = %result.provider_name,
            is_from_fallback = result.is_from_fallback,
            elapsed_ms = result.elapsed_ms(),
            "Generation completed"
        );

        Ok(result)
    }
}
