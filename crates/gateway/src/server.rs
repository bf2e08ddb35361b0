//! Axum-based HTTP server for the gateway.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use sentinel_core::{Error, ExecutionReport, Result};
use sentinel_orchestrator::OrchestratorService;

use crate::auth::AuthService;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Enable CORS.
    pub enable_cors: bool,
    /// Enable request tracing.
    pub enable_tracing: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
            enable_tracing: true,
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Orchestrated request driver.
    pub service: Arc<OrchestratorService>,
    /// Token issuer/validator; absent when auth is disabled.
    pub auth: Option<Arc<AuthService>>,
}

/// Gateway server.
pub struct GatewayServer {
    config: GatewayConfig,
    service: Arc<OrchestratorService>,
    auth: Option<Arc<AuthService>>,
    metrics_handle: Option<PrometheusHandle>,
}

impl GatewayServer {
    /// Create a new gateway server.
    pub fn new(config: GatewayConfig, service: Arc<OrchestratorService>) -> Self {
        Self {
            config,
            service,
            auth: None,
            metrics_handle: None,
        }
    }

    /// Enable token issuance and bearer resolution.
    pub fn with_auth(mut self, auth: Arc<AuthService>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Expose Prometheus metrics at `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Build the axum router.
    pub fn build_router(&self) -> Router {
        let state = Arc::new(AppState {
            service: self.service.clone(),
            auth: self.auth.clone(),
        });

        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/v1/auth/token", post(token_handler))
            .route("/v1/agents/execute", post(execute_handler))
            .route("/v1/agents/:agent_name", post(agent_handler))
            .with_state(state);

        if let Some(handle) = &self.metrics_handle {
            let handle = handle.clone();
            router = router.route("/metrics", get(move || async move { handle.render() }));
        }

        if self.config.enable_cors {
            router = router.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any));
        }

        if self.config.enable_tracing {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::gateway(format!("Failed to bind: {}", e)))?;

        tracing::info!(addr = %addr, "Gateway server starting");

        axum::serve(listener, self.build_router())
            .await
            .map_err(|e| Error::gateway(format!("Server error: {}", e)))?;

        Ok(())
    }
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Orchestrated execution request.
#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    /// User query.
    pub query: String,
    /// Context overrides passed through to the selected specialist.
    #[serde(default)]
    pub context: HashMap<String, Value>,
    /// Session to resume; a fresh one is minted when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Standalone specialist request.
#[derive(Debug, Deserialize)]
pub struct AgentRequest {
    pub query: String,
    #[serde(default)]
    pub context: HashMap<String, Value>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Standalone specialist response.
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub result: String,
    pub metadata: HashMap<String, Value>,
    pub agent_name: String,
}

/// Token issuance request.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
}

/// Token issuance response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Resolve the requesting user from an optional bearer token.
///
/// Absent, malformed, or invalid tokens all fall back to the anonymous
/// user; authentication is optional on execution endpoints.
fn current_user(headers: &HeaderMap, auth: Option<&AuthService>) -> String {
    let Some(auth) = auth else {
        return "anonymous".to_string();
    };

    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) => match auth.validate(token) {
            Ok(claims) => claims.sub,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected bearer token; continuing as anonymous");
                "anonymous".to_string()
            }
        },
        None => "anonymous".to_string(),
    }
}

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Token issuance handler.
async fn token_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TokenRequest>,
) -> Response {
    let Some(auth) = &state.auth else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                code: "AUTH_DISABLED".to_string(),
                message: "Token issuance is disabled".to_string(),
            }),
        )
            .into_response();
    };

    match auth.issue_token(&payload.username) {
        Ok(access_token) => (
            StatusCode::OK,
            Json(TokenResponse {
                access_token,
                token_type: "bearer".to_string(),
                expires_in: auth.ttl_secs(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Token issuance failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    code: "TOKEN_ERROR".to_string(),
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Orchestrated execution handler.
///
/// Routes the query through the main workflow. The response is always a
/// well-formed [`ExecutionReport`]; its `error` field signals failure.
async fn execute_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ExecuteRequest>,
) -> Json<ExecutionReport> {
    let trace_id = Uuid::new_v4().to_string();
    let user_id = current_user(&headers, state.auth.as_deref());

    tracing::info!(
        trace_id = %trace_id,
        user_id = %user_id,
        query_len = payload.query.len(),
        "Processing execute request"
    );

    let report = state
        .service
        .execute_query(&payload.query, &user_id, payload.session_id, payload.context)
        .await;

    let status = if report.error.is_none() { "ok" } else { "error" };
    metrics::counter!("gateway_requests_total", "endpoint" => "execute", "status" => status)
        .increment(1);

    Json(report)
}

/// Standalone specialist handler.
///
/// Invokes one specialist directly, bypassing the routing graph.
async fn agent_handler(
    State(state): State<Arc<AppState>>,
    Path(agent_name): Path<String>,
    Json(payload): Json<AgentRequest>,
) -> Response {
    match state
        .service
        .execute_agent(&agent_name, &payload.query, payload.context, payload.session_id)
        .await
    {
        Ok(output) => (
            StatusCode::OK,
            Json(AgentResponse {
                result: output.result,
                metadata: output.metadata,
                agent_name,
            }),
        )
            .into_response(),
        Err(Error::UnknownAgent(name)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                code: "UNKNOWN_AGENT".to_string(),
                message: format!("Unknown agent: {}", name),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(agent = %agent_name, error = %e, "Specialist execution failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    code: "EXECUTION_ERROR".to_string(),
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::config::RoutingStrategy;
    use sentinel_core::mocks::MockLlm;
    use sentinel_store::InMemoryCheckpointStore;

    fn test_state() -> Arc<AppState> {
        let service = Arc::new(OrchestratorService::new(
            Arc::new(MockLlm::constant("ok")),
            None,
            Arc::new(InMemoryCheckpointStore::new()),
            RoutingStrategy::Keyword,
        ));
        Arc::new(AppState {
            service,
            auth: Some(Arc::new(AuthService::new("test-secret", 60))),
        })
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_execute_handler_always_returns_report() {
        let state = test_state();

        let Json(report) = execute_handler(
            State(state),
            HeaderMap::new(),
            Json(ExecuteRequest {
                query: "triage this alert".to_string(),
                context: HashMap::new(),
                session_id: None,
            }),
        )
        .await;

        assert!(report.error.is_none());
        assert_eq!(report.metadata["user_id"], serde_json::json!("anonymous"));
    }

    #[tokio::test]
    async fn test_unknown_agent_is_404() {
        let state = test_state();

        let response = agent_handler(
            State(state),
            Path("not_an_agent".to_string()),
            Json(AgentRequest {
                query: "hello".to_string(),
                context: HashMap::new(),
                session_id: None,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_current_user_resolves_bearer() {
        let auth = AuthService::new("test-secret", 60);
        let token = auth.issue_token("analyst1").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("authorization", format!("Bearer {}", token).parse().unwrap());

        assert_eq!(current_user(&headers, Some(&auth)), "analyst1");
        assert_eq!(current_user(&HeaderMap::new(), Some(&auth)), "anonymous");
        assert_eq!(current_user(&headers, None), "anonymous");
    }
}
