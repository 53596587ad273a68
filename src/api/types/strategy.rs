//! Request and response bodies of the strategy endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationRequest, GenerationResult};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStrategyRequest {
    #[validate(length(min = 10, max = 10000, message = "must be between 10 and 10000 characters"))]
    pub case_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStrategyResponse {
    pub strategy: String,
    pub generated_at: DateTime<Utc>,
    pub case_description: String,
    pub provider: String,
    pub is_from_fallback: bool,
}

impl GenerateStrategyResponse {
    pub fn new(result: GenerationResult, case_description: String) -> Self {
        Self {
            strategy: result.content,
            generated_at: Utc::now(),
            case_description,
            provider: result.provider_name,
            is_from_fallback: result.is_from_fallback,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[validate(length(min = 5, max = 15000, message = "must be between 5 and 15000 characters"))]
    pub prompt: String,
    #[validate(length(max = 2000))]
    pub system_prompt: Option<String>,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,
    #[validate(range(min = 100, max = 4000))]
    pub max_tokens: Option<u32>,
}

impl AnalyzeRequest {
    pub fn into_generation_request(self) -> GenerationRequest {
        GenerationRequest::builder(self.prompt)
            .system_prompt(self.system_prompt.unwrap_or_default())
            .temperature(self.temperature.unwrap_or(DEFAULT_TEMPERATURE))
            .max_tokens(self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS))
            .build()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub content: String,
    pub provider_name: String,
    pub elapsed_ms: u64,
    pub is_from_fallback: bool,
    pub generated_at_utc: DateTime<Utc>,
}

impl From<GenerationResult> for AnalyzeResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            elapsed_ms: result.elapsed_ms(),
            content: result.content,
            provider_name: result.provider_name,
            is_from_fallback: result.is_from_fallback,
            generated_at_utc: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub is_available: bool,
    pub checked_at_utc: DateTime<Utc>,
    pub status: AvailabilityStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl StatusResponse {
    pub fn from_availability(is_available: bool) -> Self {
        Self {
            is_available,
            checked_at_utc: Utc::now(),
            status: if is_available {
                AvailabilityStatus::Available
            } else {
                AvailabilityStatus::Unavailable
            },
            error_message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_available: false,
            checked_at_utc: Utc::now(),
            status: AvailabilityStatus::Error,
            error_message: Some(message.into()),
        }
    }
}
