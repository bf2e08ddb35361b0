//! Team workflow: one supervisor decision, one specialist execution.

use std::sync::Arc;

use serde_json::Value;

use sentinel_agents::build_specialist;
use sentinel_core::{
    config::RoutingStrategy,
    traits::{LlmClient, Retriever},
    AgentInput, AgentName, ConversationState, Result, TeamName,
};

use crate::supervisors::{TeamRoute, TeamSupervisor};

/// State machine for one team.
///
/// Entry is conditional on the team supervisor's decision; each specialist
/// node transitions unconditionally to the terminal state afterward.
pub struct TeamWorkflow {
    team: TeamName,
    supervisor: TeamSupervisor,
    llm: Arc<dyn LlmClient>,
    retriever: Option<Arc<dyn Retriever>>,
}

impl TeamWorkflow {
    pub fn new(
        team: TeamName,
        llm: Arc<dyn LlmClient>,
        retriever: Option<Arc<dyn Retriever>>,
        strategy: RoutingStrategy,
    ) -> Self {
        Self {
            team,
            supervisor: TeamSupervisor::new(team, llm.clone(), strategy),
            llm,
            retriever,
        }
    }

    pub fn team(&self) -> TeamName {
        self.team
    }

    /// Run one traversal of the team state machine.
    pub async fn run(&self, state: &mut ConversationState) -> Result<()> {
        let agent_name = match self.supervisor.route(state).await? {
            TeamRoute::Agent(name) => name,
            TeamRoute::Finish => {
                state.current_agent = None;
                tracing::info!(team = %self.team, "Team supervisor finished without dispatch");
                return Ok(());
            }
        };

        state.current_agent = Some(agent_name);
        self.specialist_node(agent_name, state).await
    }

    /// Execute one specialist against the current request.
    async fn specialist_node(
        &self,
        name: AgentName,
        state: &mut ConversationState,
    ) -> Result<()> {
        let agent = build_specialist(name, self.llm.clone(), self.retriever.clone());

        let query = state
            .current_request()
            .unwrap_or_default()
            .to_string();
        let input = AgentInput {
            query,
            context: state.intermediate_results.clone(),
            session_id: Some(state.session_id.clone()),
        };

        tracing::info!(team = %self.team, agent = %name, "Executing specialist");
        let output = agent.process(input).await?;

        if let Some(tokens) = output.metadata.get("tokens").and_then(Value::as_u64) {
            state.total_tokens += tokens;
        }

        state.push_assistant(output.result.clone());
        state.final_result = Some(output.result);
        state.record_step(name.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::mocks::MockLlm;

    #[tokio::test]
    async fn test_specialist_node_updates_state() {
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlm::constant("triage verdict"));
        let workflow = TeamWorkflow::new(
            TeamName::SecurityOps,
            llm,
            None,
            RoutingStrategy::Keyword,
        );

        let mut state = ConversationState::new("u1", "s1");
        state.push_user("triage this alert from the EDR");

        workflow.run(&mut state).await.unwrap();

        assert_eq!(state.current_agent, Some(AgentName::IncidentTriage));
        assert_eq!(state.final_result.as_deref(), Some("triage verdict"));
        assert_eq!(state.execution_path, vec!["incident_triage"]);
        assert_eq!(
            state.last_message().map(|m| m.content.as_str()),
            Some("triage verdict")
        );
        assert!(state.total_tokens > 0);
    }

    #[tokio::test]
    async fn test_empty_state_terminates_without_specialist() {
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlm::constant("unused"));
        let workflow = TeamWorkflow::new(
            TeamName::Governance,
            llm,
            None,
            RoutingStrategy::Keyword,
        );

        let mut state = ConversationState::new("u1", "s1");
        workflow.run(&mut state).await.unwrap();

        assert_eq!(state.current_agent, None);
        assert!(state.final_result.is_none());
        assert!(state.execution_path.is_empty());
    }
}
