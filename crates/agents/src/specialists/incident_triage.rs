//! Incident triage agent for analyzing security alerts.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use sentinel_core::{
    traits::{LlmClient, SpecialistAgent},
    AgentInput, AgentName, AgentOutput, Message, Result,
};

use crate::prompts::INCIDENT_TRIAGE_PROMPT;
use crate::specialists::base_metadata;

/// Agent for analyzing security incidents and suggesting responses.
pub struct IncidentTriageAgent {
    llm: Arc<dyn LlmClient>,
}

impl IncidentTriageAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

/// Pull bullet lines out of the response as suggested actions.
fn extract_actions(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('-') || line.starts_with('•'))
        .map(|line| line.trim_start_matches(['-', '•']).trim().to_string())
        .filter(|line| !line.is_empty())
        .take(5)
        .collect()
}

#[async_trait]
impl SpecialistAgent for IncidentTriageAgent {
    fn name(&self) -> AgentName {
        AgentName::IncidentTriage
    }

    fn prompt_template(&self) -> &'static str {
        INCIDENT_TRIAGE_PROMPT
    }

    async fn process(&self, input: AgentInput) -> Result<AgentOutput> {
        let alert_details = input.context_str("alert_details", &input.query);
        let severity = input.context_str("severity", "medium");

        let messages = [
            Message::system(self.prompt_template()),
            Message::user(format!(
                "Alert Details: {}\nSeverity: {}\n\nAnalyze this alert and provide your triage assessment.",
                alert_details, severity
            )),
        ];

        let response = self.llm.chat(&messages).await?;

        let actions = extract_actions(&response.content);
        let priority = if response.content.to_lowercase().contains("critical") {
            "high"
        } else {
            "medium"
        };

        let mut metadata = base_metadata(self.name(), &response);
        metadata.insert("severity".to_string(), json!(severity));
        metadata.insert("priority".to_string(), json!(priority));
        metadata.insert(
            "suggested_actions".to_string(),
            json!(if actions.is_empty() {
                vec![
                    "Review alert details".to_string(),
                    "Investigate further".to_string(),
                ]
            } else {
                actions
            }),
        );

        Ok(AgentOutput {
            result: response.content,
            metadata,
            next_agent: None,
            confidence: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::mocks::{FailingLlm, MockLlm};

    #[tokio::test]
    async fn test_defaults_applied_and_metadata_recorded() {
        let agent = IncidentTriageAgent::new(Arc::new(MockLlm::constant(
            "Summary of the incident.\n- Block the source IP\n- Reset affected credentials",
        )));

        let output = agent
            .process(AgentInput::new("Multiple failed login attempts"))
            .await
            .unwrap();

        assert_eq!(output.metadata["agent"], json!("incident_triage"));
        assert_eq!(output.metadata["model"], json!("mock"));
        assert_eq!(output.metadata["severity"], json!("medium"));
        assert_eq!(
            output.metadata["suggested_actions"],
            json!(["Block the source IP", "Reset affected credentials"])
        );
    }

    #[tokio::test]
    async fn test_identical_input_yields_identical_output() {
        let agent = IncidentTriageAgent::new(Arc::new(MockLlm::constant("deterministic triage")));
        let input = AgentInput::new("suspicious process tree").with_context("severity", json!("high"));

        let first = agent.process(input.clone()).await.unwrap();
        let second = agent.process(input).await.unwrap();

        assert_eq!(first.result, second.result);
        assert_eq!(first.metadata, second.metadata);
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let agent = IncidentTriageAgent::new(Arc::new(FailingLlm));

        let err = agent
            .process(AgentInput::new("anything"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("backend unavailable"));
    }
}
