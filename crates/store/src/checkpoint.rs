//! Conversation-state checkpoint stores.
//!
//! Checkpoints are keyed by `(session_id, namespace)` where the namespace is
//! the owning user id. Each session's lineage is independent: a save replaces
//! only that session's checkpoint, so interleaved sessions cannot corrupt one
//! another.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use rusqlite::{params, Connection, OptionalExtension};

use sentinel_core::{
    state::epoch_millis, traits::CheckpointStore, ConversationState, Error, Result,
};

fn checkpoint_key(session_id: &str, user_id: &str) -> String {
    format!("{}/{}", user_id, session_id)
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// In-memory checkpoint store for development and tests.
#[derive(Default)]
pub struct InMemoryCheckpointStore {
    checkpoints: DashMap<String, ConversationState>,
}

impl InMemoryCheckpointStore {
    /// Create a new in-memory checkpoint store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored checkpoints.
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}

#[async_trait]
impl CheckpointStore for InMemoryCheckpointStore {
    async fn load(&self, session_id: &str, user_id: &str) -> Result<Option<ConversationState>> {
        let key = checkpoint_key(session_id, user_id);
        Ok(self.checkpoints.get(&key).map(|r| r.clone()))
    }

    async fn save(&self, state: &ConversationState) -> Result<()> {
        let key = checkpoint_key(&state.session_id, &state.user_id);
        self.checkpoints.insert(key, state.clone());
        tracing::debug!(session_id = %state.session_id, "Checkpoint saved");
        Ok(())
    }

    async fn delete(&self, session_id: &str, user_id: &str) -> Result<()> {
        self.checkpoints
            .remove(&checkpoint_key(session_id, user_id));
        Ok(())
    }
}

// =============================================================================
// SQLite Store
// =============================================================================

/// SQLite-backed checkpoint store for persistent multi-turn conversations.
pub struct SqliteCheckpointStore {
    conn: Arc<tokio::sync::Mutex<Connection>>,
}

impl SqliteCheckpointStore {
    /// Open (or create) a checkpoint database at the given path.
    pub fn new(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| Error::checkpoint(format!("DB error: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS checkpoints (
                session_id TEXT NOT NULL,
                namespace TEXT NOT NULL,
                state TEXT NOT NULL, -- JSON
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (session_id, namespace)
            )",
            [],
        )
        .map_err(|e| Error::checkpoint(format!("Schema error: {}", e)))?;

        Ok(Self {
            conn: Arc::new(tokio::sync::Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl CheckpointStore for SqliteCheckpointStore {
    async fn load(&self, session_id: &str, user_id: &str) -> Result<Option<ConversationState>> {
        let conn = self.conn.clone();
        let session_id = session_id.to_string();
        let namespace = user_id.to_string();

        let json: Option<String> = tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            conn.query_row(
                "SELECT state FROM checkpoints WHERE session_id = ?1 AND namespace = ?2",
                params![session_id, namespace],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::checkpoint(format!("Load error: {}", e)))
        })
        .await
        .map_err(|e| Error::internal(format!("Join error: {}", e)))??;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, state: &ConversationState) -> Result<()> {
        let conn = self.conn.clone();
        let session_id = state.session_id.clone();
        let namespace = state.user_id.clone();
        let json = serde_json::to_string(state)?;

        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            conn.execute(
                "INSERT OR REPLACE INTO checkpoints (session_id, namespace, state, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![session_id, namespace, json, epoch_millis()],
            )
            .map_err(|e| Error::checkpoint(format!("Save error: {}", e)))
        })
        .await
        .map_err(|e| Error::internal(format!("Join error: {}", e)))??;

        tracing::debug!(session_id = %state.session_id, "Checkpoint persisted");
        Ok(())
    }

    async fn delete(&self, session_id: &str, user_id: &str) -> Result<()> {
        let conn = self.conn.clone();
        let session_id = session_id.to_string();
        let namespace = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            conn.execute(
                "DELETE FROM checkpoints WHERE session_id = ?1 AND namespace = ?2",
                params![session_id, namespace],
            )
            .map_err(|e| Error::checkpoint(format!("Delete error: {}", e)))
        })
        .await
        .map_err(|e| Error::internal(format!("Join error: {}", e)))??;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state(session_id: &str, user_id: &str) -> ConversationState {
        let mut state = ConversationState::new(user_id, session_id);
        state.push_user("audit our access controls");
        state.record_step("main_supervisor -> governance_team");
        state
    }

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let store = InMemoryCheckpointStore::new();
        let state = sample_state("s1", "u1");

        store.save(&state).await.unwrap();

        let loaded = store.load("s1", "u1").await.unwrap().unwrap();
        assert_eq!(loaded.messages.len(), 1);
        assert_eq!(loaded.execution_path.len(), 1);

        // Different namespace sees nothing.
        assert!(store.load("s1", "u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_save_replaces() {
        let store = InMemoryCheckpointStore::new();
        let mut state = sample_state("s1", "u1");

        store.save(&state).await.unwrap();
        state.push_assistant("done");
        store.save(&state).await.unwrap();

        assert_eq!(store.len(), 1);
        let loaded = store.load("s1", "u1").await.unwrap().unwrap();
        assert_eq!(loaded.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_sqlite_round_trip() {
        let dir = std::env::temp_dir().join(format!("sentinel-ckpt-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("checkpoints.db");

        let store = SqliteCheckpointStore::new(&path).unwrap();
        let state = sample_state("s-sql", "u-sql");

        store.save(&state).await.unwrap();
        let loaded = store.load("s-sql", "u-sql").await.unwrap().unwrap();
        assert_eq!(loaded.session_id, "s-sql");
        assert_eq!(loaded.messages.len(), 1);

        store.delete("s-sql", "u-sql").await.unwrap();
        assert!(store.load("s-sql", "u-sql").await.unwrap().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
