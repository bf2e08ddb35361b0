#![deny(unused)]
//! Core types, traits, and error definitions for Sentinel.
//!
//! This crate provides the foundational building blocks shared across all layers
//! of the security-operations assistant: the conversation state threaded through
//! every workflow node, the team/agent registry, the capability traits for LLM
//! backends, document retrieval, and state checkpointing, and the mock
//! implementations used by tests throughout the workspace.

pub mod config;
pub mod error;
pub mod mocks;
pub mod registry;
pub mod state;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use registry::{AgentName, TeamName};
pub use state::{ConversationState, Message, Role};
pub use traits::*;
pub use types::*;
