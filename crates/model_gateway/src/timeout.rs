//! Bounded-timeout decorator for LLM clients.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use sentinel_core::{
    traits::{LlmClient, LlmResponse},
    Error, Message, Result,
};

/// Wraps an [`LlmClient`] so every call is bounded by a deadline.
///
/// A stalled backend call fails the owning request with a timeout error
/// instead of blocking it indefinitely; the error is retryable by the caller.
pub struct TimeoutClient {
    inner: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl TimeoutClient {
    /// Wrap `inner` with a per-call deadline.
    pub fn new(inner: Arc<dyn LlmClient>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl LlmClient for TimeoutClient {
    async fn chat(&self, messages: &[Message]) -> Result<LlmResponse> {
        match tokio::time::timeout(self.timeout, self.inner.chat(messages)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "LLM call timed out");
                Err(Error::timeout(format!(
                    "LLM call exceeded {}s",
                    self.timeout.as_secs()
                )))
            }
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        match tokio::time::timeout(self.timeout, self.inner.embed(text)).await {
            Ok(result) => result,
            Err(_) => Err(Error::timeout(format!(
                "Embedding call exceeded {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}
