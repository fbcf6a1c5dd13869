//! Mock provider implementation for testing.

use super::{CompletionProvider, CompletionResponse, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

enum MockBehavior {
    Reply(String),
    Fail(String),
}

/// Mock completion provider for tests.
///
/// Records every question it is asked so tests can assert whether and
/// with what input the backend was called.
pub struct MockCompletionProvider {
    behavior: MockBehavior,
    delay: Option<Duration>,
    questions: Mutex<Vec<String>>,
}

impl MockCompletionProvider {
    /// A provider that answers every question with `text`.
    pub fn replying(text: &str) -> Self {
        Self {
            behavior: MockBehavior::Reply(text.to_string()),
            delay: None,
            questions: Mutex::new(Vec::new()),
        }
    }

    /// A provider that fails every call with an API error.
    pub fn failing(message: &str) -> Self {
        Self {
            behavior: MockBehavior::Fail(message.to_string()),
            delay: None,
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Delay each call before responding.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Questions received so far, in call order.
    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .expect("question log lock poisoned")
            .clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, question: &str) -> Result<CompletionResponse, ProviderError> {
        self.questions
            .lock()
            .expect("question log lock poisoned")
            .push(question.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(CompletionResponse {
                text: text.clone(),
                input_tokens: Some(question.len() as u32 / 4),
                output_tokens: Some(10),
            }),
            MockBehavior::Fail(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }
}
