//! Rig LLM client adapter.
//!
//! Wraps Rig's provider clients for integration with our LlmClient trait.

use async_trait::async_trait;

use sentinel_core::{
    traits::{LlmClient, LlmResponse, LlmUsage},
    Error, Message, Result, Role,
};

// Import required Rig traits
use rig::client::{CompletionClient, EmbeddingsClient, ProviderClient};
use rig::completion::Prompt;

/// Provider type for Rig clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigProvider {
    OpenAi,
    Anthropic,
    /// Any backend speaking the OpenAI wire protocol at a custom base URL
    /// (LM Studio, Ollama, vLLM).
    OpenAiCompatible,
}

/// Configuration for a Rig client.
#[derive(Debug, Clone)]
pub struct RigConfig {
    /// Provider to use.
    pub provider: RigProvider,
    /// Model name.
    pub model: String,
    /// Embedding model name.
    pub embed_model: String,
    /// Temperature (0.0 - 1.0).
    pub temperature: f32,
    /// Max completion tokens.
    pub max_tokens: u64,
    /// Base URL for OpenAI-compatible backends.
    pub base_url: Option<String>,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            provider: RigProvider::OpenAi,
            model: "gpt-4o-mini".to_string(),
            embed_model: rig::providers::openai::TEXT_EMBEDDING_3_SMALL.to_string(),
            temperature: 0.7,
            max_tokens: 4096,
            base_url: None,
        }
    }
}

impl RigConfig {
    /// Create config for OpenAI.
    pub fn openai(model: impl Into<String>) -> Self {
        Self {
            provider: RigProvider::OpenAi,
            model: model.into(),
            ..Default::default()
        }
    }

    /// Create config for Anthropic.
    pub fn anthropic(model: impl Into<String>) -> Self {
        Self {
            provider: RigProvider::Anthropic,
            model: model.into(),
            ..Default::default()
        }
    }

    /// Create config for an OpenAI-compatible backend at `base_url`.
    pub fn openai_compatible(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            provider: RigProvider::OpenAiCompatible,
            model: model.into(),
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = temp;
        self
    }

    /// Set the embedding model.
    pub fn with_embed_model(mut self, model: impl Into<String>) -> Self {
        self.embed_model = model.into();
        self
    }
}

/// Rig-based LLM client.
///
/// Credentials come from the environment (`OPENAI_API_KEY` /
/// `ANTHROPIC_API_KEY`); a missing credential fails the call loudly rather
/// than degrading. OpenAI-compatible backends take an unvalidated
/// placeholder key, matching how LM Studio and Ollama treat authentication.
pub struct RigLlmClient {
    config: RigConfig,
}

impl RigLlmClient {
    /// Create a new Rig client with the given configuration.
    pub fn new(config: RigConfig) -> Self {
        Self { config }
    }

    /// Flatten role-tagged messages into a single prompt string.
    fn build_prompt(&self, messages: &[Message]) -> String {
        let mut prompt = String::new();

        for msg in messages {
            match msg.role {
                Role::System => {
                    prompt.push_str(&format!("System: {}\n\n", msg.content));
                }
                Role::User => {
                    prompt.push_str(&format!("User: {}\n\n", msg.content));
                }
                Role::Assistant => {
                    prompt.push_str(&format!("Assistant: {}\n\n", msg.content));
                }
            }
        }

        prompt
    }

    fn response_from(&self, prompt: &str, content: String) -> LlmResponse {
        LlmResponse {
            model: self.config.model.clone(),
            finish_reason: "stop".to_string(),
            usage: LlmUsage {
                prompt_tokens: (prompt.len() / 4) as u64,
                completion_tokens: (content.len() / 4) as u64,
                total_tokens: ((prompt.len() + content.len()) / 4) as u64,
            },
            content,
        }
    }

    /// Call OpenAI via Rig.
    async fn call_openai(&self, prompt: &str) -> Result<LlmResponse> {
        use rig::providers::openai;

        // Check env var first to avoid panic
        if std::env::var("OPENAI_API_KEY").is_err() {
            return Err(Error::model_config("OPENAI_API_KEY not set"));
        }

        let client = openai::Client::from_env();

        let agent = client
            .agent(&self.config.model)
            .temperature(f64::from(self.config.temperature))
            .max_tokens(self.config.max_tokens)
            .build();

        let response: String = agent
            .prompt(prompt)
            .await
            .map_err(|e| Error::model_provider(format!("OpenAI error: {}", e)))?;

        Ok(self.response_from(prompt, response))
    }

    /// Call Anthropic via Rig.
    async fn call_anthropic(&self, prompt: &str) -> Result<LlmResponse> {
        use rig::providers::anthropic;

        // Check env var first to avoid panic
        if std::env::var("ANTHROPIC_API_KEY").is_err() {
            return Err(Error::model_config("ANTHROPIC_API_KEY not set"));
        }

        let client = anthropic::Client::from_env();

        let agent = client
            .agent(&self.config.model)
            .temperature(f64::from(self.config.temperature))
            .max_tokens(self.config.max_tokens)
            .build();

        let response: String = agent
            .prompt(prompt)
            .await
            .map_err(|e| Error::model_provider(format!("Anthropic error: {}", e)))?;

        Ok(self.response_from(prompt, response))
    }

    /// Call an OpenAI-compatible backend via Rig.
    async fn call_openai_compatible(&self, prompt: &str) -> Result<LlmResponse> {
        use rig::providers::openai;

        let base_url = self
            .config
            .base_url
            .as_deref()
            .ok_or_else(|| Error::model_config("base_url not set for openai_compatible"))?;

        // Local backends accept any key
        let client: openai::Client = openai::Client::builder()
            .api_key("sentinel-local")
            .base_url(base_url)
            .build()
            .map_err(|e| Error::model_provider(format!("OpenAI client build error: {}", e)))?;

        let agent = client
            .agent(&self.config.model)
            .temperature(f64::from(self.config.temperature))
            .max_tokens(self.config.max_tokens)
            .build();

        let response: String = agent
            .prompt(prompt)
            .await
            .map_err(|e| Error::model_provider(format!("Backend error at {}: {}", base_url, e)))?;

        Ok(self.response_from(prompt, response))
    }
}

#[async_trait]
impl LlmClient for RigLlmClient {
    async fn chat(&self, messages: &[Message]) -> Result<LlmResponse> {
        let prompt = self.build_prompt(messages);

        tracing::debug!(
            provider = ?self.config.provider,
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Calling LLM"
        );

        match self.config.provider {
            RigProvider::OpenAi => self.call_openai(&prompt).await,
            RigProvider::Anthropic => self.call_anthropic(&prompt).await,
            RigProvider::OpenAiCompatible => self.call_openai_compatible(&prompt).await,
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        use rig::embeddings::EmbeddingsBuilder;
        use rig::providers::openai;

        // Anthropic has no embeddings API; everything funnels through an
        // OpenAI(-compatible) endpoint.
        let client: openai::Client = match (self.config.provider, self.config.base_url.as_deref()) {
            (RigProvider::OpenAiCompatible, Some(url)) => openai::Client::builder()
                .api_key("sentinel-local")
                .base_url(url)
                .build()
                .map_err(|e| Error::model_provider(format!("OpenAI client build error: {}", e)))?,
            _ => {
                if std::env::var("OPENAI_API_KEY").is_err() {
                    return Err(Error::model_config("OPENAI_API_KEY not set for embeddings"));
                }
                openai::Client::from_env()
            }
        };

        let embedding_model = client.embedding_model(&self.config.embed_model);

        let result = EmbeddingsBuilder::new(embedding_model)
            .document(text)
            .map_err(|e| Error::model_provider(format!("Embedding builder error: {}", e)))?
            .build()
            .await
            .map_err(|e| Error::model_provider(format!("Embedding error: {}", e)))?;

        // Rig v0.28 returns Vec<(&str, OneOrMany<Embedding>)>; embeddings are
        // f64, convert to f32.
        if let Some((_, one_or_many)) = result.into_iter().next() {
            if let Some(embedding) = one_or_many.into_iter().next() {
                let vec_f32: Vec<f32> = embedding.vec.into_iter().map(|x| x as f32).collect();
                return Ok(vec_f32);
            }
        }

        Err(Error::model_provider("No embedding returned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = RigConfig::anthropic("claude-3-5-sonnet-20241022").with_temperature(0.2);

        assert_eq!(config.provider, RigProvider::Anthropic);
        assert_eq!(config.model, "claude-3-5-sonnet-20241022");
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_build_prompt() {
        let client = RigLlmClient::new(RigConfig::default());

        let messages = vec![
            Message::system("You are a security analyst"),
            Message::user("Triage this alert"),
        ];

        let prompt = client.build_prompt(&messages);
        assert!(prompt.contains("System: You are a security analyst"));
        assert!(prompt.contains("User: Triage this alert"));
    }

    #[test]
    fn test_compatible_requires_base_url() {
        let config = RigConfig {
            provider: RigProvider::OpenAiCompatible,
            base_url: None,
            ..Default::default()
        };
        let client = RigLlmClient::new(config);

        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let err = rt
            .block_on(client.chat(&[Message::user("hello")]))
            .unwrap_err();
        assert!(matches!(err, Error::ModelConfig(_)));
    }
}
