//! Orchestration layer for Sentinel.
//!
//! Two levels of supervised routing run here: the main supervisor classifies
//! a request into a team, the team supervisor classifies it into a
//! specialist, the specialist executes one LLM call, and results propagate
//! back through the shared conversation state. The driver service wraps one
//! full traversal per request and owns checkpointing and failure wrapping.

pub mod service;
pub mod supervisors;
pub mod workflows;

pub use service::OrchestratorService;
pub use supervisors::{MainRoute, MainSupervisor, TeamRoute, TeamSupervisor};
pub use workflows::{MainWorkflow, TeamWorkflow};
