//! Wire format shared by the OpenAI and Azure OpenAI chat-completions endpoints

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, GenerationRequest};

/// System instruction sent with every direct chat-completion call
pub const ADVISOR_INSTRUCTION: &str = "You are a legal strategy advisor AI assistant. Provide comprehensive, well-structured legal analysis and strategy recommendations. Always include relevant legal precedents, potential risks, and actionable steps. Format your response clearly with sections and bullet points where appropriate.";

pub const PROBE_PROMPT: &str = "Hello";
pub const PROBE_MAX_TOKENS: u32 = 10;

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    pub messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub max_tokens: u32,
}

/// Two-message exchange: the advisor instruction (plus any caller system prompt) and the user prompt
pub fn generation_body<'a>(
    model: Option<&'a str>,
    system: &'a str,
    request: &'a GenerationRequest,
) -> serde_json::Value {
    let body = ChatCompletionBody {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: &request.prompt,
            },
        ],
        temperature: Some(request.temperature),
        max_tokens: request.max_tokens,
    };

    serde_json::to_value(body).unwrap_or_default()
}

/// Minimal single-message completion used for availability probes
pub fn probe_body(model: Option<&str>) -> serde_json::Value {
    let body = ChatCompletionBody {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: PROBE_PROMPT,
        }],
        temperature: None,
        max_tokens: PROBE_MAX_TOKENS,
    };

    serde_json::to_value(body).unwrap_or_default()
}

/// Advisor instruction, extended with the caller's own system prompt when one is given
pub fn system_message(request: &GenerationRequest) -> String {
    let extra = request.system_prompt.trim();
    if extra.is_empty() {
        ADVISOR_INSTRUCTION.to_string()
    } else {
        format!("{}\n\n{}", ADVISOR_INSTRUCTION, extra)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Join the content of every returned choice; empty output is a provider failure
pub fn parse_content(provider: &str, json: serde_json::Value) -> Result<String, DomainError> {
    let response: ChatCompletionResponse = serde_json::from_value(json).map_err(|e| {
        DomainError::provider(provider, format!("Failed to parse response: {}", e))
    })?;

    let content = response
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.content)
        .collect::<Vec<_>>()
        .join("\n");

    if content.trim().is_empty() {
        return Err(DomainError::provider(
            provider,
            format!("Empty response received from {}", provider),
        ));
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_body_shape() {
        let request = GenerationRequest::builder("Assess my lease dispute")
            .temperature(0.2)
            .max_tokens(500)
            .build();
        let system = system_message(&request);

        let body = generation_body(Some("gpt-4o-mini"), &system, &request);

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], ADVISOR_INSTRUCTION);
        assert_eq!(body["messages"][1]["content"], "Assess my lease dispute");
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_system_message_appends_caller_prompt() {
        let request = GenerationRequest::builder("x")
            .system_prompt("Answer in Spanish")
            .build();

        let system = system_message(&request);
        assert!(system.starts_with(ADVISOR_INSTRUCTION));
        assert!(system.ends_with("Answer in Spanish"));
    }

    #[test]
    fn test_probe_body_omits_model_for_azure() {
        let body = probe_body(None);
        assert!(body.get("model").is_none());
        assert!(body.get("temperature").is_none());
        assert_eq!(body["max_tokens"], 10);
        assert_eq!(body["messages"][0]["content"], "Hello");
    }

    #[test]
    fn test_parse_content_joins_choices() {
        let json = serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "Part one"}},
                {"message": {"role": "assistant", "content": "Part two"}}
            ]
        });

        assert_eq!(parse_content("OpenAI", json).unwrap(), "Part one\nPart two");
    }

    #[test]
    fn test_parse_content_rejects_empty() {
        let json = serde_json::json!({"choices": [{"message": {"content": "  "}}]});
        let err = parse_content("OpenAI", json).unwrap_err();
        assert!(matches!(err, DomainError::Provider { ref provider, .. } if provider == "OpenAI"));

        let no_choices = serde_json::json!({"choices": []});
        assert!(parse_content("OpenAI", no_choices).is_err());
    }
}
