//! In-memory knowledge index with embedding-based similarity search.
//!
//! Read-mostly after startup seeding; concurrent lookups share the read
//! lock, writes take the write lock and should happen at initialization.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use sentinel_core::{
    traits::{LlmClient, Retriever},
    Document, Result,
};

struct IndexedDocument {
    id: String,
    document: Document,
    embedding: Vec<f32>,
}

/// Knowledge index that embeds documents through the LLM backend and ranks
/// lookups by cosine similarity.
pub struct EmbeddingRetriever {
    llm: Arc<dyn LlmClient>,
    entries: RwLock<Vec<IndexedDocument>>,
}

impl EmbeddingRetriever {
    /// Create an empty index backed by the given embedding client.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Number of indexed documents.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Compute cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl Retriever for EmbeddingRetriever {
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        let query_embedding = self.llm.embed(query).await?;
        let entries = self.entries.read().await;

        let mut scored: Vec<(f32, &IndexedDocument)> = entries
            .iter()
            .map(|e| (cosine_similarity(&query_embedding, &e.embedding), e))
            .collect();

        // Sort by similarity descending
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let results: Vec<Document> = scored
            .into_iter()
            .take(k)
            .filter(|(score, _)| *score > 0.0)
            .map(|(_, entry)| entry.document.clone())
            .collect();

        tracing::debug!(
            query_len = query.len(),
            k,
            hits = results.len(),
            "Similarity search"
        );

        Ok(results)
    }

    async fn add_documents(&self, documents: Vec<Document>) -> Result<Vec<String>> {
        let mut indexed = Vec::with_capacity(documents.len());
        for document in documents {
            let embedding = self.llm.embed(&document.content).await?;
            indexed.push(IndexedDocument {
                id: Uuid::new_v4().to_string(),
                document,
                embedding,
            });
        }

        let mut entries = self.entries.write().await;
        let ids: Vec<String> = indexed.iter().map(|e| e.id.clone()).collect();
        entries.extend(indexed);

        tracing::debug!(added = ids.len(), total = entries.len(), "Documents indexed");
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::mocks::MockLlm;

    #[tokio::test]
    async fn test_search_ranks_by_similarity() {
        let retriever = EmbeddingRetriever::new(Arc::new(MockLlm::constant("unused")));

        retriever
            .add_documents(vec![
                Document::from_source("zero trust architecture", "NIST SP 800-207"),
                Document::from_source("incident response process", "NIST SP 800-61"),
            ])
            .await
            .unwrap();

        // The mock embedding is deterministic per text, so the exact string
        // comes back first.
        let results = retriever
            .similarity_search("zero trust architecture", 1)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].content.contains("zero trust"));
    }

    #[tokio::test]
    async fn test_search_caps_at_k() {
        let retriever = EmbeddingRetriever::new(Arc::new(MockLlm::constant("unused")));

        let docs = (0..5)
            .map(|i| Document::from_source(format!("document {}", i), "test"))
            .collect();
        retriever.add_documents(docs).await.unwrap();

        let results = retriever.similarity_search("document", 3).await.unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_cosine_edge_cases() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    }
}
