//! Anomaly investigation agent for logs and behavioral deviations.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use sentinel_core::{
    traits::{LlmClient, SpecialistAgent},
    AgentInput, AgentName, AgentOutput, Message, Result,
};

use crate::prompts::ANOMALY_INVESTIGATION_PROMPT;
use crate::specialists::base_metadata;

/// Agent for investigating anomalies in security logs and behavior.
pub struct AnomalyInvestigationAgent {
    llm: Arc<dyn LlmClient>,
}

impl AnomalyInvestigationAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SpecialistAgent for AnomalyInvestigationAgent {
    fn name(&self) -> AgentName {
        AgentName::AnomalyInvestigation
    }

    fn prompt_template(&self) -> &'static str {
        ANOMALY_INVESTIGATION_PROMPT
    }

    async fn process(&self, input: AgentInput) -> Result<AgentOutput> {
        let anomaly_data = input.context_str("anomaly_data", &input.query);
        let baseline = input.context_str("baseline", "Normal behavior not specified");

        let messages = [
            Message::system(self.prompt_template()),
            Message::user(format!(
                "Anomaly Data: {}\nBaseline: {}\n\nPlease investigate this anomaly and provide your analysis.",
                anomaly_data, baseline
            )),
        ];

        let response = self.llm.chat(&messages).await?;

        let mut metadata = base_metadata(self.name(), &response);
        metadata.insert(
            "has_baseline".to_string(),
            json!(input.context.contains_key("baseline")),
        );

        Ok(AgentOutput {
            result: response.content,
            metadata,
            next_agent: None,
            confidence: None,
        })
    }
}
