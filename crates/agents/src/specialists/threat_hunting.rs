//! Threat hunting agent for proactive threat detection.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use sentinel_core::{
    traits::{LlmClient, SpecialistAgent},
    AgentInput, AgentName, AgentOutput, Message, Result,
};

use crate::prompts::THREAT_HUNTING_PROMPT;
use crate::specialists::base_metadata;

/// Agent for generating threat hunting hypotheses and investigations.
pub struct ThreatHuntingAgent {
    llm: Arc<dyn LlmClient>,
}

impl ThreatHuntingAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SpecialistAgent for ThreatHuntingAgent {
    fn name(&self) -> AgentName {
        AgentName::ThreatHunting
    }

    fn prompt_template(&self) -> &'static str {
        THREAT_HUNTING_PROMPT
    }

    async fn process(&self, input: AgentInput) -> Result<AgentOutput> {
        let hunting_context = input.context_str("hunting_context", &input.query);
        let known_threats = input.context_str("known_threats", "No specific threats identified");

        let messages = [
            Message::system(self.prompt_template()),
            Message::user(format!(
                "Hunting Context: {}\nKnown Threats: {}\n\nPlease generate threat hunting hypotheses and investigation steps.",
                hunting_context, known_threats
            )),
        ];

        let response = self.llm.chat(&messages).await?;

        let mut metadata = base_metadata(self.name(), &response);
        metadata.insert(
            "has_known_threats".to_string(),
            json!(input.context.contains_key("known_threats")),
        );

        Ok(AgentOutput {
            result: response.content,
            metadata,
            next_agent: None,
            confidence: None,
        })
    }
}
