//! Completion provider abstractions and implementations.
//!
//! A trait-based seam over the chat-completion backend so the HTTP
//! surface can run against a mock in tests.

pub mod groq;
pub mod mock;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

const DEFAULT_TEMPERATURE: f32 = 0.5;
const DEFAULT_MAX_TOKENS: u32 = 512;
const DEFAULT_TOP_P: f32 = 0.9;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("completion contained no answer text")]
    EmptyCompletion,
}

impl ProviderError {
    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::ApiError(_) => "api_error",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::EmptyCompletion => "empty_completion",
        }
    }
}

// Every provider failure surfaces to callers as a 502 with the cause.
impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::BadGateway(format!("Groq API request failed: {}", err))
    }
}

/// Result of a completion call.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated answer text.
    pub text: String,

    /// Input tokens consumed, when the provider reports usage.
    pub input_tokens: Option<u32>,

    /// Output tokens generated, when the provider reports usage.
    pub output_tokens: Option<u32>,
}

/// Sampling parameters sent with every completion call.
///
/// The defaults are the fixed production values; tests substitute their
/// own through [`groq::GroqProvider::with_params`].
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: DEFAULT_TOP_P,
        }
    }
}

/// Trait for chat-completion providers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one question and return the generated answer.
    async fn complete(&self, question: &str) -> Result<CompletionResponse, ProviderError>;
}
