//! Capability traits for Sentinel.
//!
//! These traits define the contracts the orchestration core depends on.
//! Concrete LLM providers, vector indexes, and checkpoint backends live in
//! their own crates and are passed in behind these abstractions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::AgentName;
use crate::state::{ConversationState, Message};
use crate::types::{AgentInput, AgentOutput, Document};

// =============================================================================
// LLM Backend
// =============================================================================

/// Response from an LLM backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Generated content.
    pub content: String,
    /// Model that served the call.
    pub model: String,
    /// Finish reason.
    pub finish_reason: String,
    /// Token usage.
    pub usage: LlmUsage,
}

/// Token usage from one LLM call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmUsage {
    /// Prompt tokens.
    pub prompt_tokens: u64,
    /// Completion tokens.
    pub completion_tokens: u64,
    /// Total tokens.
    pub total_tokens: u64,
}

/// LLM client interface.
///
/// Construction must fail loudly on misconfiguration (e.g. a missing
/// credential); a constructed client only fails per-call.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a chat completion over role-tagged messages.
    async fn chat(&self, messages: &[Message]) -> Result<LlmResponse>;

    /// Generate a completion for a bare prompt.
    async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
        self.chat(&[Message::user(prompt)]).await
    }

    /// Generate an embedding vector for text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

// =============================================================================
// Document Retrieval
// =============================================================================

/// Similarity-search interface over a document index.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return the `k` documents most similar to the query, best first.
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>>;

    /// Index documents, returning their assigned ids.
    async fn add_documents(&self, documents: Vec<Document>) -> Result<Vec<String>>;
}

// =============================================================================
// State Checkpointing
// =============================================================================

/// Persistence for conversation state, keyed by `(session_id, user_id)`.
///
/// Each session's checkpoint lineage is independent; a save replaces the
/// previous checkpoint for that session atomically.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Load the latest checkpoint for a session, if one exists.
    async fn load(&self, session_id: &str, user_id: &str) -> Result<Option<ConversationState>>;

    /// Persist a new checkpoint for the state's session.
    async fn save(&self, state: &ConversationState) -> Result<()>;

    /// Drop a session's checkpoint.
    async fn delete(&self, session_id: &str, user_id: &str) -> Result<()>;
}

// =============================================================================
// Specialist Agents
// =============================================================================

/// A single-purpose LLM-backed responder bound to one instruction template.
///
/// Stateless per invocation: output depends only on the input and the
/// backend's response. Backend failures propagate to the caller uncaught.
#[async_trait]
pub trait SpecialistAgent: Send + Sync {
    /// The agent's registry name.
    fn name(&self) -> AgentName;

    /// The fixed role instruction this agent fills in.
    fn prompt_template(&self) -> &'static str;

    /// Process one input with exactly one backend call.
    async fn process(&self, input: AgentInput) -> Result<AgentOutput>;
}
