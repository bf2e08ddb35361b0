//! Vulnerability prioritization agent.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use sentinel_core::{
    traits::{LlmClient, SpecialistAgent},
    AgentInput, AgentName, AgentOutput, Message, Result,
};

use crate::prompts::VULNERABILITY_PRIORITIZATION_PROMPT;
use crate::specialists::base_metadata;

/// Agent for risk-ranking vulnerabilities against business context.
pub struct VulnerabilityPrioritizationAgent {
    llm: Arc<dyn LlmClient>,
}

impl VulnerabilityPrioritizationAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SpecialistAgent for VulnerabilityPrioritizationAgent {
    fn name(&self) -> AgentName {
        AgentName::VulnerabilityPrioritization
    }

    fn prompt_template(&self) -> &'static str {
        VULNERABILITY_PRIORITIZATION_PROMPT
    }

    async fn process(&self, input: AgentInput) -> Result<AgentOutput> {
        let vulnerabilities = input.context_str("vulnerabilities", &input.query);
        let asset_context = input.context_str("asset_context", "Business context not provided");

        let messages = [
            Message::system(self.prompt_template()),
            Message::user(format!(
                "Vulnerabilities: {}\nAsset Context: {}\n\nPlease prioritize these vulnerabilities and provide your assessment.",
                vulnerabilities, asset_context
            )),
        ];

        let response = self.llm.chat(&messages).await?;

        let mut metadata = base_metadata(self.name(), &response);
        metadata.insert(
            "has_asset_context".to_string(),
            json!(input.context.contains_key("asset_context")),
        );

        Ok(AgentOutput {
            result: response.content,
            metadata,
            next_agent: None,
            confidence: None,
        })
    }
}
