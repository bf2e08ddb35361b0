//! Request/response types shared across the workspace.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Specialist Agent I/O
// =============================================================================

/// Input for a specialist agent.
///
/// Decoupled from [`crate::ConversationState`] so that a specialist can be
/// invoked standalone (e.g. straight from an HTTP endpoint) without going
/// through the routing graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInput {
    /// User query or task description.
    pub query: String,
    /// Additional context data the agent may read overrides from.
    #[serde(default)]
    pub context: HashMap<String, Value>,
    /// Session this invocation belongs to, if any.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl AgentInput {
    /// Create an input with an empty context.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: HashMap::new(),
            session_id: None,
        }
    }

    /// Attach a context value.
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Read a context value as a string, with a default when absent.
    ///
    /// Non-string values are rendered as JSON so a numeric override (e.g. an
    /// attempt count) still reaches the prompt.
    pub fn context_str(&self, key: &str, default: &str) -> String {
        match self.context.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => default.to_string(),
        }
    }
}

/// Output from a specialist agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutput {
    /// Raw textual result of the agent's LLM call.
    pub result: String,
    /// Execution metadata; always carries at least the agent name.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    /// Suggested next agent to execute, if the agent has an opinion.
    #[serde(default)]
    pub next_agent: Option<String>,
    /// Confidence in the result, in [0, 1], where the agent reports one.
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl AgentOutput {
    /// Create an output carrying only a result string.
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            metadata: HashMap::new(),
            next_agent: None,
            confidence: None,
        }
    }
}

// =============================================================================
// Driver Output
// =============================================================================

/// Result of one top-level orchestrated request.
///
/// The driver always produces a well-formed report; `error` being populated
/// is the only reliable failure signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Final specialist answer, or an error-prefixed message on failure.
    pub result: String,
    /// Audit trail of every routing decision and execution step.
    pub execution_path: Vec<String>,
    /// Session the request ran under.
    pub session_id: String,
    /// Wall-clock execution time in seconds.
    pub execution_time: f64,
    /// Team/agent/token bookkeeping.
    pub metadata: HashMap<String, Value>,
    /// Failure description; `None` on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Retrieval Types
// =============================================================================

/// A document stored in, or retrieved from, the knowledge index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document text.
    pub content: String,
    /// Source/category annotations.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a document with a single `source` metadata entry.
    pub fn from_source(content: impl Into<String>, source: impl Into<String>) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), source.into());
        Self {
            content: content.into(),
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_str_defaults() {
        let input = AgentInput::new("check the logs")
            .with_context("severity", json!("high"))
            .with_context("attempts", json!(50));

        assert_eq!(input.context_str("severity", "medium"), "high");
        assert_eq!(input.context_str("attempts", "0"), "50");
        assert_eq!(input.context_str("framework", "NIST CSF"), "NIST CSF");
    }
}
