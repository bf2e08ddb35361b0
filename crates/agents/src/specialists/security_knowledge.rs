//! Security knowledge agent with optional retrieval augmentation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use sentinel_core::{
    traits::{LlmClient, Retriever, SpecialistAgent},
    AgentInput, AgentName, AgentOutput, Message, Result,
};

use crate::prompts::SECURITY_KNOWLEDGE_PROMPT;
use crate::specialists::base_metadata;

/// Passages folded into the prompt per request.
const RETRIEVAL_TOP_K: usize = 3;

/// Agent for answering security architecture and best-practice questions.
///
/// When a retriever is attached, the query is first looked up against the
/// knowledge index and the top passages are folded into the prompt context.
/// A failing lookup degrades to the unaugmented prompt; retrieval problems
/// never fail the request on their own.
pub struct SecurityKnowledgeAgent {
    llm: Arc<dyn LlmClient>,
    retriever: Option<Arc<dyn Retriever>>,
    top_k: usize,
}

impl SecurityKnowledgeAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            retriever: None,
            top_k: RETRIEVAL_TOP_K,
        }
    }

    /// Attach a document retriever.
    pub fn with_retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Override how many passages are folded into the prompt.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Look up reference passages, or `None` when retrieval is unavailable,
    /// empty, or failing.
    async fn retrieve_context(&self, query: &str) -> Option<(String, Vec<String>)> {
        let retriever = self.retriever.as_ref()?;
        match retriever.similarity_search(query, self.top_k).await {
            Ok(documents) if !documents.is_empty() => {
                let passages = documents
                    .iter()
                    .map(|d| d.content.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n");
                let sources = documents
                    .iter()
                    .filter_map(|d| d.metadata.get("source").cloned())
                    .collect();
                Some((passages, sources))
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Retrieval failed; answering without reference material");
                None
            }
        }
    }
}

#[async_trait]
impl SpecialistAgent for SecurityKnowledgeAgent {
    fn name(&self) -> AgentName {
        AgentName::SecurityKnowledge
    }

    fn prompt_template(&self) -> &'static str {
        SECURITY_KNOWLEDGE_PROMPT
    }

    async fn process(&self, input: AgentInput) -> Result<AgentOutput> {
        let mut context = input.context_str("knowledge_context", "General security inquiry");

        let retrieved = self.retrieve_context(&input.query).await;
        let (retrieval_used, sources) = match &retrieved {
            Some((passages, sources)) => {
                context = format!("{}\n\nReference material:\n{}", context, passages);
                (true, sources.clone())
            }
            None => (false, Vec::new()),
        };

        let messages = [
            Message::system(self.prompt_template()),
            Message::user(format!(
                "Question: {}\nContext: {}\n\nPlease provide a comprehensive answer based on security best practices.",
                input.query, context
            )),
        ];

        let response = self.llm.chat(&messages).await?;

        let mut metadata = base_metadata(self.name(), &response);
        metadata.insert("question_type".to_string(), json!("security_knowledge"));
        metadata.insert("retrieval_used".to_string(), json!(retrieval_used));
        if retrieval_used {
            metadata.insert("sources".to_string(), json!(sources));
        }

        Ok(AgentOutput {
            result: response.content,
            metadata,
            next_agent: None,
            confidence: None,
        })
    }
}
