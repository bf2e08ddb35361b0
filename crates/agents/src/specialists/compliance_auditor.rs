//! Compliance auditor agent for assessment and reporting.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use sentinel_core::{
    traits::{LlmClient, SpecialistAgent},
    AgentInput, AgentName, AgentOutput, Message, Result,
};

use crate::prompts::COMPLIANCE_AUDITOR_PROMPT;
use crate::specialists::base_metadata;

/// Agent for analyzing compliance findings and generating reports.
pub struct ComplianceAuditorAgent {
    llm: Arc<dyn LlmClient>,
}

impl ComplianceAuditorAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SpecialistAgent for ComplianceAuditorAgent {
    fn name(&self) -> AgentName {
        AgentName::ComplianceAuditor
    }

    fn prompt_template(&self) -> &'static str {
        COMPLIANCE_AUDITOR_PROMPT
    }

    async fn process(&self, input: AgentInput) -> Result<AgentOutput> {
        let findings = input.context_str("findings", &input.query);
        let framework = input.context_str("framework", "NIST CSF");
        let scope = input.context_str("scope", "Organization-wide");

        let messages = [
            Message::system(self.prompt_template()),
            Message::user(format!(
                "Compliance Findings: {}\nFramework: {}\nScope: {}\n\nPlease analyze these compliance findings and provide your assessment.",
                findings, framework, scope
            )),
        ];

        let response = self.llm.chat(&messages).await?;

        let mut metadata = base_metadata(self.name(), &response);
        metadata.insert("framework".to_string(), json!(framework));
        metadata.insert("scope".to_string(), json!(scope));

        Ok(AgentOutput {
            result: response.content,
            metadata,
            next_agent: None,
            confidence: None,
        })
    }
}
