//! Configuration-driven LLM client construction.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;

use sentinel_core::config::LlmConfig;
use sentinel_core::{traits::LlmClient, Error, Result};

use crate::rig_client::{RigConfig, RigLlmClient};
use crate::timeout::TimeoutClient;

/// Build the process-wide LLM client from configuration.
///
/// Fails loudly on an unknown provider or a missing credential instead of
/// silently degrading. API keys provided through configuration are exported
/// to the environment, which is where Rig's provider clients read them.
pub fn client_from_config(cfg: &LlmConfig) -> Result<Arc<dyn LlmClient>> {
    let rig_config = match cfg.provider.to_lowercase().as_str() {
        "openai" => {
            if let Some(key) = &cfg.openai_api_key {
                std::env::set_var("OPENAI_API_KEY", key.expose_secret());
            }
            if std::env::var("OPENAI_API_KEY").is_err() {
                return Err(Error::model_config(
                    "OPENAI_API_KEY not found in configuration or environment",
                ));
            }
            RigConfig::openai(&cfg.model)
        }
        "anthropic" => {
            if let Some(key) = &cfg.anthropic_api_key {
                std::env::set_var("ANTHROPIC_API_KEY", key.expose_secret());
            }
            if std::env::var("ANTHROPIC_API_KEY").is_err() {
                return Err(Error::model_config(
                    "ANTHROPIC_API_KEY not found in configuration or environment",
                ));
            }
            RigConfig::anthropic(&cfg.model)
        }
        "openai_compatible" | "lmstudio" | "ollama" => {
            let base_url = cfg.base_url.clone().ok_or_else(|| {
                Error::model_config(format!(
                    "llm.base_url is required for provider '{}'",
                    cfg.provider
                ))
            })?;
            RigConfig::openai_compatible(&cfg.model, base_url)
                .with_embed_model("nomic-embed-text")
        }
        other => {
            return Err(Error::model_config(format!("Unknown provider: {}", other)));
        }
    };

    let rig_config = rig_config.with_temperature(cfg.temperature);

    tracing::info!(
        provider = %cfg.provider,
        model = %cfg.model,
        timeout_secs = cfg.request_timeout_secs,
        "LLM client initialized"
    );

    let client = Arc::new(RigLlmClient::new(rig_config));
    Ok(Arc::new(TimeoutClient::new(
        client,
        Duration::from_secs(cfg.request_timeout_secs),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_fails_loudly() {
        let cfg = LlmConfig {
            provider: "mystery".into(),
            ..Default::default()
        };
        assert!(matches!(
            client_from_config(&cfg),
            Err(Error::ModelConfig(_))
        ));
    }

    #[test]
    fn test_compatible_provider_requires_base_url() {
        let cfg = LlmConfig {
            provider: "lmstudio".into(),
            base_url: None,
            ..Default::default()
        };
        assert!(matches!(
            client_from_config(&cfg),
            Err(Error::ModelConfig(_))
        ));
    }

    #[test]
    fn test_compatible_provider_with_base_url() {
        let cfg = LlmConfig {
            provider: "ollama".into(),
            model: "llama3.1:8b".into(),
            base_url: Some("http://localhost:11434/v1".into()),
            ..Default::default()
        };
        assert!(client_from_config(&cfg).is_ok());
    }
}
