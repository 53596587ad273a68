use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Parameters for one orchestrated generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn builder(prompt: impl Into<String>) -> GenerationRequestBuilder {
        GenerationRequestBuilder {
            request: Self::new(prompt),
        }
    }

    /// Check the invariants every adapter relies on
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.prompt.trim().is_empty() {
            return Err(DomainError::validation("Prompt cannot be empty"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(DomainError::validation(format!(
                "Temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(DomainError::validation("max_tokens must be greater than 0"));
        }

        Ok(())
    }
}

/// Builder for GenerationRequest
#[derive(Debug)]
pub struct GenerationRequestBuilder {
    request: GenerationRequest,
}

impl GenerationRequestBuilder {
    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.request.system_prompt = system_prompt.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.request.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.request.max_tokens = max_tokens;
        self
    }

    pub fn build(self) -> GenerationRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::builder("Review this lease")
            .system_prompt("You are a legal advisor")
            .temperature(0.2)
            .max_tokens(500)
            .build();

        assert_eq!(request.prompt, "Review this lease");
        assert_eq!(request.system_prompt, "You are a legal advisor");
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.max_tokens, 500);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let request = GenerationRequest::new("Hello");
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(request.system_prompt.is_empty());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(GenerationRequest::new("   ").validate().is_err());
        assert!(
            GenerationRequest::builder("x")
                .temperature(2.5)
                .build()
                .validate()
                .is_err()
        );
        assert!(
            GenerationRequest::builder("x")
                .max_tokens(0)
                .build()
                .validate()
                .is_err()
        );
    }
}
