//! Routing supervisors.
//!
//! Each supervisor maps the current request to a downstream name or a
//! terminal finish signal. Two interchangeable strategies exist: keyword
//! matching over the latest request, and a model-based classifier. Invalid
//! or unparseable model output is not an error; it is silently corrected to
//! the documented default.

mod keywords;
mod main_supervisor;
mod prompts;
mod team_supervisor;

pub use main_supervisor::MainSupervisor;
pub use team_supervisor::TeamSupervisor;

use sentinel_core::{AgentName, TeamName};

/// A team supervisor's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRoute {
    /// Dispatch to one specialist of the team.
    Agent(AgentName),
    /// Nothing to do; terminate the workflow.
    Finish,
}

/// The main supervisor's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainRoute {
    /// Dispatch to one team workflow.
    Team(TeamName),
    /// Nothing to do; terminate the workflow.
    Finish,
}
