use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Kinds of text-generation backend the gateway can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiProviderType {
    Mock,
    OpenAI,
    AzureOpenAI,
    PythonAI,
}

impl AiProviderType {
    /// Order in which secondary providers are appended behind the primary
    pub const FALLBACK_ORDER: [AiProviderType; 4] = [
        AiProviderType::PythonAI,
        AiProviderType::OpenAI,
        AiProviderType::AzureOpenAI,
        AiProviderType::Mock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "Mock",
            Self::OpenAI => "OpenAI",
            Self::AzureOpenAI => "AzureOpenAI",
            Self::PythonAI => "PythonAI",
        }
    }
}

impl fmt::Display for AiProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiProviderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "openai" => Ok(Self::OpenAI),
            "azureopenai" => Ok(Self::AzureOpenAI),
            "pythonai" => Ok(Self::PythonAI),
            other => Err(DomainError::configuration(format!(
                "Unknown AI provider type '{}'",
                other
            ))),
        }
    }
}
