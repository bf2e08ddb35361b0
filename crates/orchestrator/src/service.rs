//! Request driver: one workflow traversal per call, checkpointing, and
//! failure wrapping.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use uuid::Uuid;

use sentinel_agents::build_specialist;
use sentinel_core::{
    config::RoutingStrategy,
    traits::{CheckpointStore, LlmClient, Retriever},
    AgentInput, AgentName, AgentOutput, ConversationState, Error, ExecutionReport, Result,
};

use crate::workflows::MainWorkflow;

/// Drives orchestrated requests end to end.
///
/// The caller always receives a well-formed [`ExecutionReport`]; an
/// exception anywhere in the traversal is caught here and wrapped, with the
/// `error` field as the only reliable failure signal.
pub struct OrchestratorService {
    workflow: MainWorkflow,
    llm: Arc<dyn LlmClient>,
    retriever: Option<Arc<dyn Retriever>>,
    checkpoints: Arc<dyn CheckpointStore>,
}

impl OrchestratorService {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        retriever: Option<Arc<dyn Retriever>>,
        checkpoints: Arc<dyn CheckpointStore>,
        strategy: RoutingStrategy,
    ) -> Self {
        Self {
            workflow: MainWorkflow::new(llm.clone(), retriever.clone(), strategy),
            llm,
            retriever,
            checkpoints,
        }
    }

    /// Execute one orchestrated request.
    ///
    /// Resumes the session's conversation from its checkpoint when one
    /// exists, appends the new request, runs the main workflow, and persists
    /// the updated state.
    pub async fn execute_query(
        &self,
        query: &str,
        user_id: &str,
        session_id: Option<String>,
        context: HashMap<String, Value>,
    ) -> ExecutionReport {
        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let started = Instant::now();

        tracing::info!(session_id = %session_id, user_id = %user_id, "Executing query");

        match self
            .run_traversal(query, user_id, &session_id, context)
            .await
        {
            Ok(state) => {
                let mut metadata = HashMap::new();
                metadata.insert("user_id".to_string(), json!(user_id));
                metadata.insert(
                    "team".to_string(),
                    json!(state.current_team.map(|t| t.as_str())),
                );
                metadata.insert(
                    "agent".to_string(),
                    json!(state.current_agent.map(|a| a.as_str())),
                );
                metadata.insert("tokens".to_string(), json!(state.total_tokens));

                ExecutionReport {
                    result: state.final_result.clone().unwrap_or_default(),
                    execution_path: state.execution_path.clone(),
                    session_id,
                    execution_time: started.elapsed().as_secs_f64(),
                    metadata,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Query execution failed");

                let mut metadata = HashMap::new();
                metadata.insert("user_id".to_string(), json!(user_id));

                ExecutionReport {
                    result: format!("Error executing query: {}", e),
                    execution_path: Vec::new(),
                    session_id,
                    execution_time: started.elapsed().as_secs_f64(),
                    metadata,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn run_traversal(
        &self,
        query: &str,
        user_id: &str,
        session_id: &str,
        context: HashMap<String, Value>,
    ) -> Result<ConversationState> {
        let mut state = match self.checkpoints.load(session_id, user_id).await? {
            Some(previous) => previous,
            None => ConversationState::new(user_id, session_id),
        };

        // Routing fields are per-traversal; a resumed session starts clean.
        state.current_team = None;
        state.current_agent = None;
        state.next_action = None;

        state.push_user(query);
        state.intermediate_results.extend(context);

        match self.workflow.run(&mut state).await {
            Ok(()) => {
                self.checkpoints.save(&state).await?;
                Ok(state)
            }
            Err(e) => {
                state.record_error(e.to_string());
                if let Err(save_err) = self.checkpoints.save(&state).await {
                    tracing::warn!(error = %save_err, "Could not persist failure checkpoint");
                }
                Err(e)
            }
        }
    }

    /// Execute one specialist directly, bypassing the routing graph.
    pub async fn execute_agent(
        &self,
        agent_name: &str,
        query: &str,
        context: HashMap<String, Value>,
        session_id: Option<String>,
    ) -> Result<AgentOutput> {
        let name = AgentName::parse(agent_name)
            .ok_or_else(|| Error::UnknownAgent(agent_name.to_string()))?;

        let agent = build_specialist(name, self.llm.clone(), self.retriever.clone());
        let input = AgentInput {
            query: query.to_string(),
            context,
            session_id,
        };

        tracing::info!(agent = %name, "Executing standalone specialist");
        agent.process(input).await
    }
}
