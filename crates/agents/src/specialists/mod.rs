//! The seven specialist agents.

mod anomaly_investigation;
mod compliance_auditor;
mod incident_triage;
mod recon_orchestrator;
mod security_knowledge;
mod threat_hunting;
mod vulnerability_prioritization;

pub use anomaly_investigation::AnomalyInvestigationAgent;
pub use compliance_auditor::ComplianceAuditorAgent;
pub use incident_triage::IncidentTriageAgent;
pub use recon_orchestrator::ReconOrchestratorAgent;
pub use security_knowledge::SecurityKnowledgeAgent;
pub use threat_hunting::ThreatHuntingAgent;
pub use vulnerability_prioritization::VulnerabilityPrioritizationAgent;

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use sentinel_core::{
    traits::{LlmClient, LlmResponse, Retriever, SpecialistAgent},
    AgentName,
};

/// Construct the specialist registered under `name`.
///
/// The retriever is only wired into the security-knowledge agent; every
/// other specialist ignores it.
pub fn build_specialist(
    name: AgentName,
    llm: Arc<dyn LlmClient>,
    retriever: Option<Arc<dyn Retriever>>,
) -> Box<dyn SpecialistAgent> {
    match name {
        AgentName::IncidentTriage => Box::new(IncidentTriageAgent::new(llm)),
        AgentName::AnomalyInvestigation => Box::new(AnomalyInvestigationAgent::new(llm)),
        AgentName::VulnerabilityPrioritization => {
            Box::new(VulnerabilityPrioritizationAgent::new(llm))
        }
        AgentName::ThreatHunting => Box::new(ThreatHuntingAgent::new(llm)),
        AgentName::ReconOrchestrator => Box::new(ReconOrchestratorAgent::new(llm)),
        AgentName::ComplianceAuditor => Box::new(ComplianceAuditorAgent::new(llm)),
        AgentName::SecurityKnowledge => {
            let mut agent = SecurityKnowledgeAgent::new(llm);
            if let Some(retriever) = retriever {
                agent = agent.with_retriever(retriever);
            }
            Box::new(agent)
        }
    }
}

/// Metadata every specialist records: its own name, the backend model that
/// served the call, and the call's token usage.
pub(crate) fn base_metadata(name: AgentName, response: &LlmResponse) -> HashMap<String, Value> {
    let mut metadata = HashMap::new();
    metadata.insert("agent".to_string(), json!(name.as_str()));
    metadata.insert("model".to_string(), json!(response.model));
    metadata.insert("tokens".to_string(), json!(response.usage.total_tokens));
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::mocks::MockLlm;

    #[test]
    fn test_factory_covers_every_registered_agent() {
        for name in AgentName::ALL {
            let llm: Arc<dyn LlmClient> = Arc::new(MockLlm::constant("ok"));
            let agent = build_specialist(name, llm, None);
            assert_eq!(agent.name(), name);
            assert!(!agent.prompt_template().is_empty());
        }
    }
}
