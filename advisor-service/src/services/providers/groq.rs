//! Groq completion provider.
//!
//! Talks to Groq's OpenAI-compatible chat-completions endpoint. Every
//! call carries the fixed travel-advisor system instruction and the
//! caller's question verbatim; one attempt, bounded by the configured
//! timeout, no retry.

use super::{CompletionProvider, CompletionResponse, GenerationParams, ProviderError};
use crate::config::GroqConfig;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider name as reported by the health endpoint.
pub const PROVIDER_NAME: &str = "Groq";

/// System instruction sent with every question.
pub const SYSTEM_PROMPT: &str = "You are a professional travel advisor. Always respond with:
- Clear section headers (##)
- Bullet points
- Concise factual information
- Up-to-date requirements
Example format:
## Visa Requirements
- Valid passport (6+ months validity)
- Proof of onward travel";

/// Groq chat-completion provider.
pub struct GroqProvider {
    config: GroqConfig,
    params: GenerationParams,
    client: Client,
}

impl GroqProvider {
    pub fn new(config: GroqConfig) -> Self {
        Self::with_params(config, GenerationParams::default())
    }

    pub fn with_params(config: GroqConfig, params: GenerationParams) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            params,
            client,
        }
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.config.api_base)
    }

    fn build_request(&self, question: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: question.to_string(),
                },
            ],
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
            top_p: self.params.top_p,
        }
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(&self, question: &str) -> Result<CompletionResponse, ProviderError> {
        let request = self.build_request(question);

        tracing::debug!(
            model = %self.config.model,
            question_len = question.len(),
            "Sending request to Groq API"
        );

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(ProviderError::ApiError(format!(
                "Groq API error {}: {}",
                status, error_text
            )));
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let usage = api_response.usage;
        let text = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ProviderError::EmptyCompletion)?;

        Ok(CompletionResponse {
            text,
            input_tokens: usage.as_ref().and_then(|u| u.prompt_tokens),
            output_tokens: usage.as_ref().and_then(|u| u.completion_tokens),
        })
    }
}

// ============================================================================
// Chat-completions request/response types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn test_provider() -> GroqProvider {
        GroqProvider::new(GroqConfig {
            api_key: Secret::new("test-api-key".to_string()),
            model: "llama3-70b-8192".to_string(),
            api_base: "https://api.groq.com/openai/v1".to_string(),
            timeout_seconds: 15,
        })
    }

    #[test]
    fn api_url_targets_chat_completions() {
        assert_eq!(
            test_provider().api_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn request_carries_system_prompt_then_question() {
        let request = test_provider().build_request("What visa do I need for Japan?");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "llama3-70b-8192");
        assert_eq!(json["max_tokens"], 512);

        // The f32 fields widen to f64 in the Value; compare within a tolerance.
        let temperature = json["temperature"].as_f64().unwrap();
        assert!((temperature - 0.5).abs() < 1e-6);
        let top_p = json["top_p"].as_f64().unwrap();
        assert!((top_p - 0.9).abs() < 1e-6);

        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], SYSTEM_PROMPT);
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "What visa do I need for Japan?");
    }

    #[test]
    fn response_without_content_parses_to_none() {
        let raw = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
        assert!(parsed.usage.is_none());
    }

    #[test]
    fn response_with_usage_parses_token_counts() {
        let raw = r###"{
            "choices": [{"message": {"role": "assistant", "content": "## Visa"}}],
            "usage": {"prompt_tokens": 42, "completion_tokens": 17, "total_tokens": 59}
        }"###;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.prompt_tokens, Some(42));
        assert_eq!(usage.completion_tokens, Some(17));
    }
}
