//! Team-level supervisor: picks one specialist within a team, or finishes.

use std::sync::Arc;

use sentinel_core::{
    config::RoutingStrategy,
    registry::{agents_of, default_agent},
    traits::LlmClient,
    AgentName, ConversationState, Message, Result, TeamName,
};

use super::keywords::{first_match, team_keywords};
use super::prompts::team_prompt;
use super::TeamRoute;

/// Supervisor for the specialists of one team.
pub struct TeamSupervisor {
    team: TeamName,
    llm: Arc<dyn LlmClient>,
    strategy: RoutingStrategy,
}

impl TeamSupervisor {
    pub fn new(team: TeamName, llm: Arc<dyn LlmClient>, strategy: RoutingStrategy) -> Self {
        Self {
            team,
            llm,
            strategy,
        }
    }

    /// Targets this supervisor may route to, plus the finish sentinel.
    pub fn available_agents(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            agents_of(self.team).iter().map(|a| a.as_str()).collect();
        names.push("FINISH");
        names
    }

    /// Decide which specialist should handle the current request.
    ///
    /// With no messages at all there is nothing to route; both strategies
    /// return finish without touching the backend.
    pub async fn route(&self, state: &ConversationState) -> Result<TeamRoute> {
        if state.messages.is_empty() {
            return Ok(TeamRoute::Finish);
        }

        let text = state
            .current_request()
            .or_else(|| state.last_message().map(|m| m.content.as_str()))
            .unwrap_or_default()
            .to_string();

        match self.strategy {
            RoutingStrategy::Keyword => Ok(self.route_by_keyword(&text)),
            RoutingStrategy::Model => self.route_by_model(&text).await,
        }
    }

    fn route_by_keyword(&self, text: &str) -> TeamRoute {
        let agent = first_match(team_keywords(self.team), text).unwrap_or_else(|| {
            tracing::debug!(team = %self.team, "No keyword matched; using team default");
            default_agent(self.team)
        });
        TeamRoute::Agent(agent)
    }

    async fn route_by_model(&self, text: &str) -> Result<TeamRoute> {
        let messages = [
            Message::system(team_prompt(self.team)),
            Message::user(format!("Request: {}", text)),
        ];

        let response = self.llm.chat(&messages).await?;
        let choice = response.content.trim().to_lowercase();

        if choice == "finish" {
            return Ok(TeamRoute::Finish);
        }

        match AgentName::parse(&choice) {
            Some(agent) if agents_of(self.team).contains(&agent) => Ok(TeamRoute::Agent(agent)),
            _ => {
                tracing::debug!(
                    team = %self.team,
                    response = %choice,
                    "Model named an unknown agent; using team default"
                );
                Ok(TeamRoute::Agent(default_agent(self.team)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::mocks::MockLlm;

    fn state_with(text: &str) -> ConversationState {
        let mut state = ConversationState::new("u1", "s1");
        state.push_user(text);
        state
    }

    #[tokio::test]
    async fn test_empty_messages_finish_without_llm_call() {
        let llm = Arc::new(MockLlm::constant("incident_triage"));
        let supervisor =
            TeamSupervisor::new(TeamName::SecurityOps, llm.clone(), RoutingStrategy::Model);

        let route = supervisor
            .route(&ConversationState::new("u1", "s1"))
            .await
            .unwrap();

        assert_eq!(route, TeamRoute::Finish);
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_keyword_routing_matches_designated_agent() {
        let llm = Arc::new(MockLlm::constant("unused"));
        let supervisor = TeamSupervisor::new(TeamName::SecurityOps, llm, RoutingStrategy::Keyword);

        let route = supervisor
            .route(&state_with("please look at this UNUSUAL traffic against our baseline"))
            .await
            .unwrap();

        assert_eq!(route, TeamRoute::Agent(AgentName::AnomalyInvestigation));
    }

    #[tokio::test]
    async fn test_keyword_fallback_is_team_default_not_finish() {
        let llm = Arc::new(MockLlm::constant("unused"));
        let supervisor = TeamSupervisor::new(TeamName::ThreatIntel, llm, RoutingStrategy::Keyword);

        let route = supervisor
            .route(&state_with("tell me something"))
            .await
            .unwrap();

        assert_eq!(route, TeamRoute::Agent(AgentName::ThreatHunting));
    }

    #[tokio::test]
    async fn test_model_routing_accepts_allow_listed_agent() {
        let llm = Arc::new(MockLlm::constant("  Recon_Orchestrator \n"));
        let supervisor = TeamSupervisor::new(TeamName::ThreatIntel, llm, RoutingStrategy::Model);

        let route = supervisor.route(&state_with("map their edge")).await.unwrap();

        assert_eq!(route, TeamRoute::Agent(AgentName::ReconOrchestrator));
    }

    #[tokio::test]
    async fn test_model_routing_corrects_invalid_output_silently() {
        // The model names an agent from a different team.
        let llm = Arc::new(MockLlm::constant("incident_triage"));
        let supervisor = TeamSupervisor::new(TeamName::Governance, llm, RoutingStrategy::Model);

        let route = supervisor
            .route(&state_with("summarize our posture"))
            .await
            .unwrap();

        assert_eq!(route, TeamRoute::Agent(AgentName::SecurityKnowledge));
    }

    #[tokio::test]
    async fn test_model_routing_honors_finish() {
        let llm = Arc::new(MockLlm::constant("FINISH"));
        let supervisor = TeamSupervisor::new(TeamName::Governance, llm, RoutingStrategy::Model);

        let route = supervisor.route(&state_with("thanks, done")).await.unwrap();

        assert_eq!(route, TeamRoute::Finish);
    }

    #[test]
    fn test_available_agents_lists_allow_list_plus_finish() {
        let llm = Arc::new(MockLlm::constant("unused"));
        let supervisor = TeamSupervisor::new(TeamName::Governance, llm, RoutingStrategy::Keyword);

        assert_eq!(
            supervisor.available_agents(),
            vec!["compliance_auditor", "security_knowledge", "FINISH"]
        );
    }
}
