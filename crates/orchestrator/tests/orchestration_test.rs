//! End-to-end orchestration tests over scripted backends.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use sentinel_core::config::RoutingStrategy;
use sentinel_core::mocks::{FailingLlm, FailingRetriever, MockLlm};
use sentinel_core::traits::CheckpointStore;
use sentinel_orchestrator::OrchestratorService;
use sentinel_store::InMemoryCheckpointStore;

fn keyword_service(llm: MockLlm) -> OrchestratorService {
    OrchestratorService::new(
        Arc::new(llm),
        None,
        Arc::new(InMemoryCheckpointStore::new()),
        RoutingStrategy::Keyword,
    )
}

#[tokio::test]
async fn test_failed_login_query_lands_on_incident_triage() {
    let service = keyword_service(MockLlm::constant("Block the IP and rotate credentials."));

    let report = service
        .execute_query(
            "Multiple failed login attempts from IP 203.0.113.5",
            "analyst1",
            Some("incident-session".into()),
            HashMap::new(),
        )
        .await;

    assert!(report.error.is_none());
    assert_eq!(
        report.execution_path.last().map(String::as_str),
        Some("incident_triage")
    );
    assert!(!report.result.is_empty());
    assert_eq!(report.metadata["agent"], json!("incident_triage"));
    assert_eq!(report.metadata["team"], json!("security_ops_team"));
    assert!(report.execution_time >= 0.0);
}

#[tokio::test]
async fn test_threat_hunting_query_routes_team_then_specialist() {
    let service = keyword_service(MockLlm::constant("Five hypotheses about exfiltration."));

    let report = service
        .execute_query(
            "generate threat hunting hypotheses for data exfiltration",
            "analyst2",
            None,
            HashMap::new(),
        )
        .await;

    let team_idx = report
        .execution_path
        .iter()
        .position(|s| s == "threat_intel_team")
        .expect("team entry present");
    let agent_idx = report
        .execution_path
        .iter()
        .position(|s| s == "threat_hunting")
        .expect("specialist entry present");
    assert!(team_idx < agent_idx);
    assert_eq!(report.metadata["team"], json!("threat_intel_team"));
}

#[tokio::test]
async fn test_model_strategy_traversal_uses_scripted_decisions() {
    let llm = MockLlm::new(vec![
        "threat_intel_team".into(),
        "threat_hunting".into(),
        "Hunt for DNS tunneling first.".into(),
    ]);
    let service = OrchestratorService::new(
        Arc::new(llm),
        None,
        Arc::new(InMemoryCheckpointStore::new()),
        RoutingStrategy::Model,
    );

    let report = service
        .execute_query(
            "where should we start hunting?",
            "analyst3",
            None,
            HashMap::new(),
        )
        .await;

    assert_eq!(
        report.execution_path,
        vec![
            "main_supervisor -> threat_intel_team",
            "threat_intel_team",
            "threat_hunting"
        ]
    );
    assert_eq!(report.result, "Hunt for DNS tunneling first.");
}

#[tokio::test]
async fn test_failing_retrieval_still_answers_governance_query() {
    let service = OrchestratorService::new(
        Arc::new(MockLlm::constant("Zero trust: never trust, always verify.")),
        Some(Arc::new(FailingRetriever)),
        Arc::new(InMemoryCheckpointStore::new()),
        RoutingStrategy::Keyword,
    );

    let report = service
        .execute_query(
            "explain the zero trust architecture best practice",
            "architect",
            None,
            HashMap::new(),
        )
        .await;

    assert!(report.error.is_none());
    assert_eq!(report.metadata["agent"], json!("security_knowledge"));
    assert_eq!(report.result, "Zero trust: never trust, always verify.");
}

#[tokio::test]
async fn test_backend_failure_yields_structured_failure_report() {
    let service = OrchestratorService::new(
        Arc::new(FailingLlm),
        None,
        Arc::new(InMemoryCheckpointStore::new()),
        RoutingStrategy::Keyword,
    );

    let report = service
        .execute_query(
            "triage the incident on host db-01",
            "analyst1",
            Some("failing-session".into()),
            HashMap::new(),
        )
        .await;

    assert!(report.result.starts_with("Error executing query:"));
    assert!(report.error.is_some());
    assert!(report.execution_path.is_empty());
    assert_eq!(report.session_id, "failing-session");
}

#[tokio::test]
async fn test_failure_is_recorded_in_checkpointed_state() {
    let checkpoints = Arc::new(InMemoryCheckpointStore::new());
    let service = OrchestratorService::new(
        Arc::new(FailingLlm),
        None,
        checkpoints.clone(),
        RoutingStrategy::Keyword,
    );

    service
        .execute_query(
            "triage the incident on host db-01",
            "analyst1",
            Some("err-session".into()),
            HashMap::new(),
        )
        .await;

    let state = checkpoints
        .load("err-session", "analyst1")
        .await
        .unwrap()
        .expect("failure checkpoint saved");
    assert_eq!(state.errors.len(), 1);
    assert!(state.errors[0].contains("backend unavailable"));
}

#[tokio::test]
async fn test_session_resume_appends_to_history_and_path() {
    let checkpoints = Arc::new(InMemoryCheckpointStore::new());
    let service = OrchestratorService::new(
        Arc::new(MockLlm::constant("assessment")),
        None,
        checkpoints.clone(),
        RoutingStrategy::Keyword,
    );

    for _ in 0..2 {
        let report = service
            .execute_query(
                "audit our compliance findings",
                "auditor",
                Some("multi-turn".into()),
                HashMap::new(),
            )
            .await;
        assert!(report.error.is_none());
    }

    let state = checkpoints
        .load("multi-turn", "auditor")
        .await
        .unwrap()
        .unwrap();

    // Per turn: user message, routing message, specialist answer.
    assert_eq!(state.messages.len(), 6);
    // Per turn: supervisor entry, team entry, specialist entry, appended.
    assert_eq!(state.execution_path.len(), 6);
    assert_eq!(
        &state.execution_path[..3],
        &state.execution_path[3..],
        "each turn records the same three steps in order"
    );
}

#[tokio::test]
async fn test_context_overrides_reach_the_specialist() {
    let service = keyword_service(MockLlm::constant("compliant"));

    let mut context = HashMap::new();
    context.insert("framework".to_string(), json!("ISO 27001"));

    let output = service
        .execute_agent("compliance_auditor", "review findings", context, None)
        .await
        .unwrap();

    assert_eq!(output.metadata["framework"], json!("ISO 27001"));
    assert_eq!(output.metadata["agent"], json!("compliance_auditor"));
}

#[tokio::test]
async fn test_unknown_standalone_agent_is_rejected() {
    let service = keyword_service(MockLlm::constant("unused"));

    let err = service
        .execute_agent("coffee_fetcher", "espresso please", HashMap::new(), None)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("coffee_fetcher"));
}
