//! Built-in security reference corpus.
//!
//! Seeded into the knowledge index at startup so the security-knowledge
//! agent has grounding material before any operator-supplied documents
//! arrive. Seeding is a write and must run before the index serves lookups.

use std::collections::HashMap;

use sentinel_core::{traits::Retriever, Document, Result};

fn doc(content: &str, source: &str, category: &str) -> Document {
    let mut metadata = HashMap::new();
    metadata.insert("source".to_string(), source.to_string());
    metadata.insert("category".to_string(), category.to_string());
    Document {
        content: content.to_string(),
        metadata,
    }
}

/// The reference documents shipped with the system.
pub fn security_reference_documents() -> Vec<Document> {
    vec![
        doc(
            "NIST Cybersecurity Framework consists of five core functions: Identify, Protect, \
             Detect, Respond, and Recover. It provides a policy framework of computer security \
             guidance for how organizations can assess and improve their ability to prevent, \
             detect, and respond to cyber attacks.",
            "NIST CSF",
            "framework",
        ),
        doc(
            "The OWASP Top 10 is a standard awareness document for web application security. It \
             represents a broad consensus about the most critical security risks to web \
             applications. Current top risks include Injection, Broken Authentication, Sensitive \
             Data Exposure, XML External Entities (XXE), Broken Access Control, Security \
             Misconfiguration, Cross-Site Scripting (XSS), Insecure Deserialization, Using \
             Components with Known Vulnerabilities, and Insufficient Logging & Monitoring.",
            "OWASP",
            "vulnerabilities",
        ),
        doc(
            "Incident Response Process typically follows these phases: 1) Preparation - \
             establishing incident response capabilities, 2) Detection & Analysis - identifying \
             and analyzing security incidents, 3) Containment, Eradication & Recovery - stopping \
             the incident and restoring systems, 4) Post-Incident Activity - lessons learned and \
             improvements.",
            "NIST SP 800-61",
            "incident_response",
        ),
        doc(
            "Zero Trust Architecture is based on the principle of 'never trust, always verify'. \
             It assumes no implicit trust is granted to assets or user accounts based solely on \
             their physical or network location. Key principles include: verify explicitly, use \
             least privilege access, and assume breach.",
            "NIST SP 800-207",
            "architecture",
        ),
        doc(
            "MITRE ATT&CK is a globally-accessible knowledge base of adversary tactics and \
             techniques based on real-world observations. It provides a common taxonomy of \
             adversary behavior organized into tactics (what adversaries are trying to achieve) \
             and techniques (how they achieve it).",
            "MITRE",
            "threat_intelligence",
        ),
        doc(
            "Security Information and Event Management (SIEM) systems provide real-time analysis \
             of security alerts generated by applications and network hardware. Key capabilities \
             include: log aggregation, correlation, alerting, dashboards, compliance reporting, \
             and forensic analysis.",
            "Security Best Practices",
            "tools",
        ),
        doc(
            "Vulnerability Management Lifecycle: 1) Discovery - identify assets and \
             vulnerabilities, 2) Prioritization - assess risk and business impact, 3) Remediation \
             - apply patches or mitigations, 4) Verification - confirm fixes are effective. CVSS \
             scoring helps prioritize based on severity.",
            "Security Operations",
            "vulnerability_management",
        ),
        doc(
            "Defense in Depth strategy employs multiple layers of security controls. If one layer \
             fails, others continue to provide protection. Layers include: perimeter security, \
             network security, host security, application security, and data security.",
            "Security Architecture",
            "defense_strategy",
        ),
    ]
}

/// Seed the knowledge index with the reference corpus.
///
/// Returns the number of documents indexed.
pub async fn seed_security_knowledge(retriever: &dyn Retriever) -> Result<usize> {
    let documents = security_reference_documents();
    let count = documents.len();
    retriever.add_documents(documents).await?;
    tracing::info!(count, "Seeded security knowledge corpus");
    Ok(count)
}
