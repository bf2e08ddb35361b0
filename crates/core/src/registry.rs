//! Central registry of teams and specialist agents.
//!
//! Teams and agents are fixed at compile time. Lookups go through pure
//! functions over immutable tables; nothing here mutates at runtime.

use serde::{Deserialize, Serialize};

/// The three specialist teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamName {
    #[serde(rename = "security_ops_team")]
    SecurityOps,
    #[serde(rename = "threat_intel_team")]
    ThreatIntel,
    #[serde(rename = "governance_team")]
    Governance,
}

impl TeamName {
    /// All teams, in routing priority order.
    pub const ALL: [TeamName; 3] = [
        TeamName::SecurityOps,
        TeamName::ThreatIntel,
        TeamName::Governance,
    ];

    /// Wire name of the team.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TeamName::SecurityOps => "security_ops_team",
            TeamName::ThreatIntel => "threat_intel_team",
            TeamName::Governance => "governance_team",
        }
    }

    /// Parse a wire name back into a team.
    pub fn parse(s: &str) -> Option<TeamName> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for TeamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven specialist agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentName {
    #[serde(rename = "incident_triage")]
    IncidentTriage,
    #[serde(rename = "anomaly_investigation")]
    AnomalyInvestigation,
    #[serde(rename = "vulnerability_prioritization")]
    VulnerabilityPrioritization,
    #[serde(rename = "threat_hunting")]
    ThreatHunting,
    #[serde(rename = "recon_orchestrator")]
    ReconOrchestrator,
    #[serde(rename = "compliance_auditor")]
    ComplianceAuditor,
    #[serde(rename = "security_knowledge")]
    SecurityKnowledge,
}

impl AgentName {
    /// All agents across every team.
    pub const ALL: [AgentName; 7] = [
        AgentName::IncidentTriage,
        AgentName::AnomalyInvestigation,
        AgentName::VulnerabilityPrioritization,
        AgentName::ThreatHunting,
        AgentName::ReconOrchestrator,
        AgentName::ComplianceAuditor,
        AgentName::SecurityKnowledge,
    ];

    /// Wire name of the agent.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AgentName::IncidentTriage => "incident_triage",
            AgentName::AnomalyInvestigation => "anomaly_investigation",
            AgentName::VulnerabilityPrioritization => "vulnerability_prioritization",
            AgentName::ThreatHunting => "threat_hunting",
            AgentName::ReconOrchestrator => "recon_orchestrator",
            AgentName::ComplianceAuditor => "compliance_auditor",
            AgentName::SecurityKnowledge => "security_knowledge",
        }
    }

    /// Parse a wire name back into an agent.
    pub fn parse(s: &str) -> Option<AgentName> {
        Self::ALL.iter().copied().find(|a| a.as_str() == s)
    }
}

impl std::fmt::Display for AgentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agents belonging to a team, in supervisor priority order.
pub const fn agents_of(team: TeamName) -> &'static [AgentName] {
    match team {
        TeamName::SecurityOps => &[
            AgentName::IncidentTriage,
            AgentName::AnomalyInvestigation,
            AgentName::VulnerabilityPrioritization,
        ],
        TeamName::ThreatIntel => &[AgentName::ThreatHunting, AgentName::ReconOrchestrator],
        TeamName::Governance => &[AgentName::ComplianceAuditor, AgentName::SecurityKnowledge],
    }
}

/// Fallback agent a team supervisor selects when a request is ambiguous.
pub const fn default_agent(team: TeamName) -> AgentName {
    match team {
        TeamName::SecurityOps => AgentName::IncidentTriage,
        TeamName::ThreatIntel => AgentName::ThreatHunting,
        TeamName::Governance => AgentName::SecurityKnowledge,
    }
}

/// The team an agent belongs to.
pub const fn team_of(agent: AgentName) -> TeamName {
    match agent {
        AgentName::IncidentTriage
        | AgentName::AnomalyInvestigation
        | AgentName::VulnerabilityPrioritization => TeamName::SecurityOps,
        AgentName::ThreatHunting | AgentName::ReconOrchestrator => TeamName::ThreatIntel,
        AgentName::ComplianceAuditor | AgentName::SecurityKnowledge => TeamName::Governance,
    }
}
