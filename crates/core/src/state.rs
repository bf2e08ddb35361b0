//! Shared conversation state threaded through every workflow node.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::{AgentName, TeamName};

/// Role tag for a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged entry in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Current time as milliseconds since the Unix epoch.
pub fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// State shared across all supervisors and specialists for one request.
///
/// One instance is created per top-level request and owned exclusively by the
/// workflow driver for the duration of one traversal. `messages`,
/// `execution_path`, and `errors` are append-only; routing fields are
/// overwritten by each router node, with `None` as the terminal value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    /// Conversation history. Never shrinks; new entries append at the end.
    pub messages: Vec<Message>,

    /// User context, set once at entry.
    pub user_id: String,
    pub session_id: String,

    /// Routing information.
    pub current_team: Option<TeamName>,
    pub current_agent: Option<AgentName>,
    pub next_action: Option<String>,

    /// Results.
    pub intermediate_results: HashMap<String, Value>,
    pub final_result: Option<String>,

    /// Ordered audit trail of every routing decision and execution step.
    pub execution_path: Vec<String>,

    /// Bookkeeping.
    pub total_tokens: u64,
    pub start_time_ms: i64,

    /// Append-only log of failures observed during traversals.
    pub errors: Vec<String>,
}

impl ConversationState {
    /// Create a fresh state for a new session.
    pub fn new(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            user_id: user_id.into(),
            session_id: session_id.into(),
            current_team: None,
            current_agent: None,
            next_action: None,
            intermediate_results: HashMap::new(),
            final_result: None,
            execution_path: Vec::new(),
            total_tokens: 0,
            start_time_ms: 0,
            errors: Vec::new(),
        }
    }

    /// Append a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// The most recent message, regardless of role.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The request currently being served: the latest user-authored entry.
    ///
    /// Routing-decision messages are appended as assistant entries before a
    /// team dispatches, so downstream readers must skip back to the last
    /// user entry to see the actual request.
    pub fn current_request(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }

    /// Record one step in the execution path.
    pub fn record_step(&mut self, step: impl Into<String>) {
        self.execution_path.push(step.into());
    }

    /// Record a failure without interrupting the append-only history.
    pub fn record_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }
}
