//! Mock implementations of core traits for testing.
//!
//! These are used across the workspace to exercise routing, workflows, and
//! the driver without a live backend.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::state::Message;
use crate::traits::{LlmClient, LlmResponse, LlmUsage, Retriever};
use crate::types::Document;

// =============================================================================
// Mock LLM Client
// =============================================================================

/// Scripted mock LLM that returns predefined responses in order.
///
/// When the queue is exhausted the last response repeats, so a single
/// `constant` response also works for multi-call traversals.
pub struct MockLlm {
    responses: Mutex<Vec<String>>,
    call_count: Mutex<usize>,
    model: String,
}

impl MockLlm {
    /// Create a new mock LLM with a queue of responses.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
            model: "mock".to_string(),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Override the model name reported in responses.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Number of chat/complete calls made to this mock.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn chat(&self, _messages: &[Message]) -> Result<LlmResponse> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        let idx = (*count - 1).min(responses.len().saturating_sub(1));
        let content = responses
            .get(idx)
            .cloned()
            .unwrap_or_else(|| "mock response".to_string());

        Ok(LlmResponse {
            content,
            model: self.model.clone(),
            finish_reason: "stop".to_string(),
            usage: LlmUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
                total_tokens: 30,
            },
        })
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        // Deterministic pseudo-embedding so tests can discriminate inputs.
        let mut v = vec![0.0f32; 8];
        for (i, b) in text.bytes().enumerate() {
            v[i % 8] += f32::from(b) / 255.0;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        Ok(v)
    }
}

/// Mock LLM whose every call fails with a provider error.
pub struct FailingLlm;

#[async_trait]
impl LlmClient for FailingLlm {
    async fn chat(&self, _messages: &[Message]) -> Result<LlmResponse> {
        Err(Error::model_provider("mock backend unavailable"))
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(Error::model_provider("mock backend unavailable"))
    }
}

// =============================================================================
// Mock Retrievers
// =============================================================================

/// Retriever that returns a fixed document list for every query.
pub struct StaticRetriever {
    documents: Vec<Document>,
}

impl StaticRetriever {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl Retriever for StaticRetriever {
    async fn similarity_search(&self, _query: &str, k: usize) -> Result<Vec<Document>> {
        Ok(self.documents.iter().take(k).cloned().collect())
    }

    async fn add_documents(&self, _documents: Vec<Document>) -> Result<Vec<String>> {
        Err(Error::retrieval("static retriever is read-only"))
    }
}

/// Retriever whose every lookup fails, for degraded-path tests.
pub struct FailingRetriever;

#[async_trait]
impl Retriever for FailingRetriever {
    async fn similarity_search(&self, _query: &str, _k: usize) -> Result<Vec<Document>> {
        Err(Error::retrieval("mock index unavailable"))
    }

    async fn add_documents(&self, _documents: Vec<Document>) -> Result<Vec<String>> {
        Err(Error::retrieval("mock index unavailable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_llm_replays_queue_then_repeats_last() {
        let llm = MockLlm::new(vec!["first".into(), "second".into()]);

        assert_eq!(llm.chat(&[]).await.unwrap().content, "first");
        assert_eq!(llm.chat(&[]).await.unwrap().content, "second");
        assert_eq!(llm.chat(&[]).await.unwrap().content, "second");
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_embedding_is_deterministic() {
        let llm = MockLlm::constant("x");
        let a = llm.embed("zero trust").await.unwrap();
        let b = llm.embed("zero trust").await.unwrap();
        let c = llm.embed("phishing").await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
