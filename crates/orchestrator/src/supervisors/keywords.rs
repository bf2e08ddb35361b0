//! Keyword tables for the keyword routing strategy.
//!
//! Tables are matched in listed order against the lower-cased request; the
//! first hit wins. Some entries are stems ("anomal", "vulnerab") so that
//! plural and verb forms match without a tokenizer.

use sentinel_core::{AgentName, TeamName};

/// Request keywords handled by each team, in priority order.
pub const MAIN_KEYWORDS: &[(&str, TeamName)] = &[
    ("incident", TeamName::SecurityOps),
    ("triage", TeamName::SecurityOps),
    ("alert", TeamName::SecurityOps),
    ("login", TeamName::SecurityOps),
    ("breach", TeamName::SecurityOps),
    ("anomal", TeamName::SecurityOps),
    ("vulnerab", TeamName::SecurityOps),
    ("cve", TeamName::SecurityOps),
    ("threat", TeamName::ThreatIntel),
    ("hunt", TeamName::ThreatIntel),
    ("ioc", TeamName::ThreatIntel),
    ("recon", TeamName::ThreatIntel),
    ("exfiltrat", TeamName::ThreatIntel),
    ("intelligence", TeamName::ThreatIntel),
    ("compliance", TeamName::Governance),
    ("audit", TeamName::Governance),
    ("framework", TeamName::Governance),
    ("policy", TeamName::Governance),
    ("regulation", TeamName::Governance),
    ("best practice", TeamName::Governance),
];

const SECURITY_OPS_KEYWORDS: &[(&str, AgentName)] = &[
    ("incident", AgentName::IncidentTriage),
    ("triage", AgentName::IncidentTriage),
    ("alert", AgentName::IncidentTriage),
    ("login", AgentName::IncidentTriage),
    ("breach", AgentName::IncidentTriage),
    ("phishing", AgentName::IncidentTriage),
    ("anomal", AgentName::AnomalyInvestigation),
    ("baseline", AgentName::AnomalyInvestigation),
    ("unusual", AgentName::AnomalyInvestigation),
    ("deviation", AgentName::AnomalyInvestigation),
    ("vulnerab", AgentName::VulnerabilityPrioritization),
    ("cve", AgentName::VulnerabilityPrioritization),
    ("cvss", AgentName::VulnerabilityPrioritization),
    ("patch", AgentName::VulnerabilityPrioritization),
    ("exploit", AgentName::VulnerabilityPrioritization),
];

const THREAT_INTEL_KEYWORDS: &[(&str, AgentName)] = &[
    ("hunt", AgentName::ThreatHunting),
    ("hypothes", AgentName::ThreatHunting),
    ("ioc", AgentName::ThreatHunting),
    ("exfiltrat", AgentName::ThreatHunting),
    ("detection", AgentName::ThreatHunting),
    ("recon", AgentName::ReconOrchestrator),
    ("osint", AgentName::ReconOrchestrator),
    ("footprint", AgentName::ReconOrchestrator),
    ("attack surface", AgentName::ReconOrchestrator),
];

const GOVERNANCE_KEYWORDS: &[(&str, AgentName)] = &[
    ("compliance", AgentName::ComplianceAuditor),
    ("audit", AgentName::ComplianceAuditor),
    ("finding", AgentName::ComplianceAuditor),
    ("regulation", AgentName::ComplianceAuditor),
    ("gdpr", AgentName::ComplianceAuditor),
    ("violation", AgentName::ComplianceAuditor),
    ("knowledge", AgentName::SecurityKnowledge),
    ("best practice", AgentName::SecurityKnowledge),
    ("architecture", AgentName::SecurityKnowledge),
    ("zero trust", AgentName::SecurityKnowledge),
];

/// Request keywords handled by each specialist of a team, in priority order.
pub const fn team_keywords(team: TeamName) -> &'static [(&'static str, AgentName)] {
    match team {
        TeamName::SecurityOps => SECURITY_OPS_KEYWORDS,
        TeamName::ThreatIntel => THREAT_INTEL_KEYWORDS,
        TeamName::Governance => GOVERNANCE_KEYWORDS,
    }
}

/// First table entry whose keyword occurs in the lower-cased text.
pub fn first_match<T: Copy>(table: &[(&str, T)], text: &str) -> Option<T> {
    let lower = text.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, target)| *target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::registry::{agents_of, team_of};

    #[test]
    fn test_first_match_is_case_insensitive() {
        assert_eq!(
            first_match(MAIN_KEYWORDS, "TRIAGE this ALERT please"),
            Some(TeamName::SecurityOps)
        );
        assert_eq!(first_match(MAIN_KEYWORDS, "hello there"), None);
    }

    #[test]
    fn test_priority_order_wins() {
        // "incident" precedes "audit" in the main table.
        assert_eq!(
            first_match(MAIN_KEYWORDS, "audit the incident response"),
            Some(TeamName::SecurityOps)
        );
    }

    #[test]
    fn test_team_tables_only_name_their_own_agents() {
        for team in TeamName::ALL {
            for (_, agent) in team_keywords(team) {
                assert_eq!(team_of(*agent), team);
                assert!(agents_of(team).contains(agent));
            }
        }
    }
}
