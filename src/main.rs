#![deny(unused)]
//! Sentinel - AI-powered security operations assistant.
//!
//! A supervised multi-agent system: a main supervisor routes each request to
//! one of three specialist teams, the team supervisor routes to one
//! specialist, and the specialist answers with a single prompt-templated
//! LLM call.

use std::sync::Arc;

use sentinel_core::config::AppConfig;
use sentinel_core::traits::{CheckpointStore, Retriever};
use sentinel_gateway::{
    configure_tracing, setup_metrics_recorder, AuthService, GatewayConfig, GatewayServer,
};
use sentinel_orchestrator::OrchestratorService;
use sentinel_store::{
    seed_security_knowledge, EmbeddingRetriever, InMemoryCheckpointStore, SqliteCheckpointStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    configure_tracing()?;

    let config = AppConfig::load()?;
    tracing::info!("Starting Sentinel v{}", env!("CARGO_PKG_VERSION"));

    // =========================================================================
    // LLM backend (process-wide, stateless, shared across sessions)
    // =========================================================================
    let llm = sentinel_model_gateway::client_from_config(&config.llm)?;

    // =========================================================================
    // Knowledge index
    // =========================================================================
    let retriever = Arc::new(EmbeddingRetriever::new(llm.clone()));
    if config.store.seed_knowledge {
        // Seeding is the only write; it runs before the server serves lookups.
        match seed_security_knowledge(retriever.as_ref()).await {
            Ok(count) => tracing::info!(count, "Knowledge index seeded"),
            Err(e) => {
                tracing::warn!(error = %e, "Knowledge seeding failed; retrieval starts empty")
            }
        }
    }
    let retriever: Arc<dyn Retriever> = retriever;

    // =========================================================================
    // Checkpoint store
    // =========================================================================
    let checkpoints: Arc<dyn CheckpointStore> = match &config.store.checkpoint_sqlite_path {
        Some(path) => {
            tracing::info!(path = %path, "Using SQLite checkpoint store");
            Arc::new(SqliteCheckpointStore::new(path)?)
        }
        None => {
            tracing::info!("Using in-memory checkpoint store");
            Arc::new(InMemoryCheckpointStore::new())
        }
    };

    // =========================================================================
    // Orchestrator
    // =========================================================================
    let service = Arc::new(OrchestratorService::new(
        llm,
        Some(retriever),
        checkpoints,
        config.orchestrator.routing_strategy,
    ));
    tracing::info!(
        strategy = ?config.orchestrator.routing_strategy,
        "Orchestrator initialized"
    );

    // =========================================================================
    // Gateway
    // =========================================================================
    let metrics_handle = setup_metrics_recorder()?;

    let gateway_config = GatewayConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        enable_cors: config.server.enable_cors,
        enable_tracing: config.server.enable_tracing,
    };

    let mut server = GatewayServer::new(gateway_config, service).with_metrics(metrics_handle);
    if let Some(auth) = AuthService::from_config(&config.auth)? {
        tracing::info!("Token issuance enabled");
        server = server.with_auth(Arc::new(auth));
    }

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "Gateway initialized"
    );

    server.run().await?;

    Ok(())
}
