//! Layered application configuration.
//!
//! Files under `config/` are merged in order (`default` → `{env}` → `local`)
//! and then overridden by `APP__`-prefixed environment variables, e.g.
//! `APP__SERVER__PORT=3000` maps to `server.port`.

use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub llm: LlmConfig,
    pub orchestrator: OrchestratorConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub enable_tracing: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            enable_cors: true,
            enable_tracing: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// When disabled, all requests run as the anonymous user.
    pub enabled: bool,
    pub jwt_secret: Option<Secret<String>>,
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            jwt_secret: None,
            token_ttl_secs: 3600,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: `openai`, `anthropic`, or `openai_compatible`.
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    /// Base URL for OpenAI-compatible local backends (LM Studio, Ollama).
    pub base_url: Option<String>,
    /// Bound on every backend call; a stalled call fails instead of hanging.
    pub request_timeout_secs: u64,
    pub openai_api_key: Option<Secret<String>>,
    pub anthropic_api_key: Option<Secret<String>>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "gpt-4o-mini".into(),
            temperature: 0.7,
            base_url: None,
            request_timeout_secs: 60,
            openai_api_key: None,
            anthropic_api_key: None,
        }
    }
}

/// How supervisors map a request to a downstream target.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoutingStrategy {
    /// Match keyword sets against the latest request, in priority order.
    Keyword,
    /// Ask the LLM backend to name the target.
    Model,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub routing_strategy: RoutingStrategy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            routing_strategy: RoutingStrategy::Keyword,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// When set, checkpoints persist to this SQLite file; otherwise in-memory.
    pub checkpoint_sqlite_path: Option<String>,
    /// Seed the knowledge index with the built-in reference corpus at startup.
    pub seed_knowledge: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            checkpoint_sqlite_path: None,
            seed_knowledge: true,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("SENTINEL_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map APP__SERVER__PORT=8000 to server.port
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_usable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.orchestrator.routing_strategy, RoutingStrategy::Keyword);
        assert!(cfg.store.checkpoint_sqlite_path.is_none());
        assert!(!cfg.auth.enabled);
    }
}
