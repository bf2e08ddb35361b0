//! Reconnaissance orchestrator agent for intelligence gathering.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use sentinel_core::{
    traits::{LlmClient, SpecialistAgent},
    AgentInput, AgentName, AgentOutput, Message, Result,
};

use crate::prompts::RECON_ORCHESTRATOR_PROMPT;
use crate::specialists::base_metadata;

/// Agent for coordinating reconnaissance activities.
pub struct ReconOrchestratorAgent {
    llm: Arc<dyn LlmClient>,
}

impl ReconOrchestratorAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SpecialistAgent for ReconOrchestratorAgent {
    fn name(&self) -> AgentName {
        AgentName::ReconOrchestrator
    }

    fn prompt_template(&self) -> &'static str {
        RECON_ORCHESTRATOR_PROMPT
    }

    async fn process(&self, input: AgentInput) -> Result<AgentOutput> {
        let target = input.context_str("target", "");
        let objectives = input.context_str("objectives", &input.query);

        let messages = [
            Message::system(self.prompt_template()),
            Message::user(format!(
                "Target: {}\nObjectives: {}\n\nPlease plan the reconnaissance effort and summarize expected intelligence.",
                target, objectives
            )),
        ];

        let response = self.llm.chat(&messages).await?;

        let mut metadata = base_metadata(self.name(), &response);
        metadata.insert("target".to_string(), json!(target));

        Ok(AgentOutput {
            result: response.content,
            metadata,
            next_agent: None,
            confidence: None,
        })
    }
}
