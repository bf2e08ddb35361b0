//! Top-level supervisor: picks the team for a request, or finishes.

use std::sync::Arc;

use sentinel_core::{
    config::RoutingStrategy, traits::LlmClient, ConversationState, Message, Result, TeamName,
};

use super::keywords::{first_match, MAIN_KEYWORDS};
use super::prompts::MAIN_SUPERVISOR_PROMPT;
use super::MainRoute;

/// Supervisor that routes requests to the appropriate team.
///
/// The two strategies deliberately disagree on their fallback: an unmatched
/// keyword request lands on the governance team (the general-knowledge
/// catch-all), while unparseable model output lands on security operations.
/// Both defaults reflect observed production behavior and must not be
/// unified.
pub struct MainSupervisor {
    llm: Arc<dyn LlmClient>,
    strategy: RoutingStrategy,
}

impl MainSupervisor {
    pub fn new(llm: Arc<dyn LlmClient>, strategy: RoutingStrategy) -> Self {
        Self { llm, strategy }
    }

    /// Targets this supervisor may route to, plus the finish sentinel.
    pub fn available_teams(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = TeamName::ALL.iter().map(|t| t.as_str()).collect();
        names.push("FINISH");
        names
    }

    /// Decide which team should handle the current request.
    pub async fn route(&self, state: &ConversationState) -> Result<MainRoute> {
        if state.messages.is_empty() {
            return Ok(MainRoute::Finish);
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

    fn route_by_keyword(&self, text: &str) -> MainRoute {
        let team = first_match(MAIN_KEYWORDS, text).unwrap_or_else(|| {
            tracing::debug!("No keyword matched; routing to governance catch-all");
            TeamName::Governance
        });
        MainRoute::Team(team)
    }

    async fn route_by_model(&self, text: &str) -> Result<MainRoute> {
        let messages = [
            Message::system(MAIN_SUPERVISOR_PROMPT),
            Message::user(format!("User request: {}", text)),
        ];

        let response = self.llm.chat(&messages).await?;
        let choice = response.content.trim().to_lowercase();

        if choice == "finish" {
            return Ok(MainRoute::Finish);
        }

        match TeamName::parse(&choice) {
            Some(team) => Ok(MainRoute::Team(team)),
            None => {
                tracing::debug!(
                    response = %choice,
                    "Model named an unknown team; defaulting to security operations"
                );
                Ok(MainRoute::Team(TeamName::SecurityOps))
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
        let llm = Arc::new(MockLlm::constant("security_ops_team"));
        let supervisor = MainSupervisor::new(llm.clone(), RoutingStrategy::Model);

        let route = supervisor
            .route(&ConversationState::new("u1", "s1"))
            .await
            .unwrap();

        assert_eq!(route, MainRoute::Finish);
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_keyword_routes_designated_team_case_insensitively() {
        let llm = Arc::new(MockLlm::constant("unused"));
        let supervisor = MainSupervisor::new(llm, RoutingStrategy::Keyword);

        let route = supervisor
            .route(&state_with("we need an INCIDENT review of yesterday's outage"))
            .await
            .unwrap();

        assert_eq!(route, MainRoute::Team(TeamName::SecurityOps));
    }

    #[tokio::test]
    async fn test_keyword_fallback_is_governance() {
        let llm = Arc::new(MockLlm::constant("unused"));
        let supervisor = MainSupervisor::new(llm, RoutingStrategy::Keyword);

        let route = supervisor
            .route(&state_with("what should I read this week?"))
            .await
            .unwrap();

        assert_eq!(route, MainRoute::Team(TeamName::Governance));
    }

    #[tokio::test]
    async fn test_model_fallback_is_security_ops() {
        let llm = Arc::new(MockLlm::constant("the_red_team_obviously"));
        let supervisor = MainSupervisor::new(llm, RoutingStrategy::Model);

        let route = supervisor
            .route(&state_with("do something"))
            .await
            .unwrap();

        assert_eq!(route, MainRoute::Team(TeamName::SecurityOps));
    }

    #[tokio::test]
    async fn test_model_routing_parses_trimmed_lowercase() {
        let llm = Arc::new(MockLlm::constant("  Threat_Intel_Team\n"));
        let supervisor = MainSupervisor::new(llm, RoutingStrategy::Model);

        let route = supervisor
            .route(&state_with("hunt for lateral movement"))
            .await
            .unwrap();

        assert_eq!(route, MainRoute::Team(TeamName::ThreatIntel));
    }
}
