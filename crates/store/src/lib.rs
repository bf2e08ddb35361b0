//! Stores for Sentinel.
//!
//! This crate provides:
//! - The embedding-backed knowledge index behind the `Retriever` trait
//! - The built-in security reference corpus and its startup seeding
//! - Conversation-state checkpoint stores (in-memory and SQLite)

pub mod checkpoint;
pub mod retriever;
pub mod seed;

pub use checkpoint::{InMemoryCheckpointStore, SqliteCheckpointStore};
pub use retriever::EmbeddingRetriever;
pub use seed::{seed_security_knowledge, security_reference_documents};
