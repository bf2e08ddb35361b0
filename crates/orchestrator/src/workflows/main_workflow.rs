//! Top-level workflow: main supervisor, team dispatch, terminal.

use std::sync::Arc;

use sentinel_core::{
    config::RoutingStrategy,
    state::epoch_millis,
    traits::{LlmClient, Retriever},
    ConversationState, Result, TeamName,
};

use crate::supervisors::{MainRoute, MainSupervisor};
use crate::workflows::TeamWorkflow;

/// The top-level state machine.
///
/// `main_supervisor` is the initial state; the conditional edge inspects the
/// routing decision (`FINISH`/none terminates, anything else selects the
/// named team node); each team node wraps its team workflow as a nested
/// sub-machine; after a team node, control reaches the terminal state
/// unconditionally.
pub struct MainWorkflow {
    supervisor: MainSupervisor,
    security_ops: TeamWorkflow,
    threat_intel: TeamWorkflow,
    governance: TeamWorkflow,
}

impl MainWorkflow {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        retriever: Option<Arc<dyn Retriever>>,
        strategy: RoutingStrategy,
    ) -> Self {
        Self {
            supervisor: MainSupervisor::new(llm.clone(), strategy),
            security_ops: TeamWorkflow::new(
                TeamName::SecurityOps,
                llm.clone(),
                retriever.clone(),
                strategy,
            ),
            threat_intel: TeamWorkflow::new(
                TeamName::ThreatIntel,
                llm.clone(),
                retriever.clone(),
                strategy,
            ),
            governance: TeamWorkflow::new(TeamName::Governance, llm, retriever, strategy),
        }
    }

    /// Run one traversal: supervisor, at most one team, terminal.
    pub async fn run(&self, state: &mut ConversationState) -> Result<()> {
        match self.supervisor_node(state).await? {
            MainRoute::Finish => Ok(()),
            MainRoute::Team(team) => self.team_node(team, state).await,
        }
    }

    /// Initial state: classify the request and record the routing decision.
    async fn supervisor_node(&self, state: &mut ConversationState) -> Result<MainRoute> {
        if state.start_time_ms == 0 {
            state.start_time_ms = epoch_millis();
        }

        let route = self.supervisor.route(state).await?;

        match route {
            MainRoute::Team(team) => {
                state.current_team = Some(team);
                state.record_step(format!("main_supervisor -> {}", team));
                state.push_assistant(format!("Routing to {}", team));
                tracing::info!(team = %team, "Main supervisor dispatching");
            }
            MainRoute::Finish => {
                state.current_team = None;
                state.record_step("main_supervisor -> FINISH");
                tracing::info!("Main supervisor finished without dispatch");
            }
        }

        Ok(route)
    }

    /// Team state: record the dispatch, then run the nested sub-machine.
    async fn team_node(&self, team: TeamName, state: &mut ConversationState) -> Result<()> {
        state.record_step(team.as_str());
        self.team_workflow(team).run(state).await
    }

    fn team_workflow(&self, team: TeamName) -> &TeamWorkflow {
        match team {
            TeamName::SecurityOps => &self.security_ops,
            TeamName::ThreatIntel => &self.threat_intel,
            TeamName::Governance => &self.governance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::mocks::MockLlm;
    use sentinel_core::AgentName;

    #[tokio::test]
    async fn test_single_dispatch_records_three_path_entries() {
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlm::constant("analysis"));
        let workflow = MainWorkflow::new(llm, None, RoutingStrategy::Keyword);

        let mut state = ConversationState::new("u1", "s1");
        state.push_user("triage the incident on host web-02");

        workflow.run(&mut state).await.unwrap();

        assert_eq!(
            state.execution_path,
            vec![
                "main_supervisor -> security_ops_team",
                "security_ops_team",
                "incident_triage"
            ]
        );
        assert_eq!(state.current_team, Some(TeamName::SecurityOps));
        assert_eq!(state.current_agent, Some(AgentName::IncidentTriage));
        assert!(state.start_time_ms > 0);
    }

    #[tokio::test]
    async fn test_empty_messages_terminate_immediately() {
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlm::constant("unused"));
        let workflow = MainWorkflow::new(llm, None, RoutingStrategy::Model);

        let mut state = ConversationState::new("u1", "s1");
        workflow.run(&mut state).await.unwrap();

        assert_eq!(state.current_team, None);
        assert_eq!(state.current_agent, None);
        assert!(state.final_result.is_none());
        assert_eq!(state.execution_path, vec!["main_supervisor -> FINISH"]);
    }
}
