use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Result, SessionId, SessionSnapshot, store::SessionStore};

/// In-memory session store for tests and the dev server.
///
/// Provides the same interface a key-value-backed implementation would.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionSnapshot>>>,
}

impl InMemorySessionStore {
    /// Creates a new empty in-memory session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored snapshots.
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, snapshot: SessionSnapshot) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(snapshot.session_id, snapshot);
        Ok(())
    }

    async fn load(&self, session_id: SessionId) -> Result<Option<SessionSnapshot>> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    async fn delete(&self, session_id: SessionId) -> Result<()> {
        self.sessions.write().await.remove(&session_id);
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.sessions.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_step(session_id: SessionId, step: u8) -> SessionSnapshot {
        SessionSnapshot::new(session_id, serde_json::json!({ "current_step": step }))
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        store.save(snapshot_with_step(id, 2)).await.unwrap();

        let loaded = store.load(id).await.unwrap().unwrap();
        assert_eq!(loaded.session_id, id);
        assert_eq!(loaded.state["current_step"], 2);
    }

    #[tokio::test]
    async fn load_missing_session_returns_none() {
        let store = InMemorySessionStore::new();
        assert!(store.load(SessionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_existing_snapshot() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        store.save(snapshot_with_step(id, 1)).await.unwrap();
        store.save(snapshot_with_step(id, 3)).await.unwrap();

        let loaded = store.load(id).await.unwrap().unwrap();
        assert_eq!(loaded.state["current_step"], 3);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_removes_snapshot() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        store.save(snapshot_with_step(id, 1)).await.unwrap();
        store.delete(id).await.unwrap();

        assert!(store.load(id).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_missing_session_is_not_an_error() {
        let store = InMemorySessionStore::new();
        store.delete(SessionId::new()).await.unwrap();
    }
}
