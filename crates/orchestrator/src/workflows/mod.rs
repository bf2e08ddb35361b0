//! Workflow state machines.
//!
//! The main workflow dispatches to exactly one team workflow per request;
//! a team workflow dispatches to exactly one specialist. Every path ends in
//! the terminal state after a single dispatch; there is no re-entry and no
//! multi-hop chaining within a traversal.

mod main_workflow;
mod team_workflow;

pub use main_workflow::MainWorkflow;
pub use team_workflow::TeamWorkflow;
