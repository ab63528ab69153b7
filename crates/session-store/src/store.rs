use async_trait::async_trait;

use crate::{Result, SessionId, SessionSnapshot};

/// Core trait for session snapshot stores.
///
/// Implementations persist one snapshot per session id, last write wins.
/// All implementations must be thread-safe (Send + Sync). Writes may lag
/// the in-memory session; the store is only read to seed a session after
/// a reload.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Saves a snapshot, replacing any existing snapshot for the session.
    async fn save(&self, snapshot: SessionSnapshot) -> Result<()>;

    /// Loads the snapshot for a session.
    ///
    /// Returns None if the session has never been saved.
    async fn load(&self, session_id: SessionId) -> Result<Option<SessionSnapshot>>;

    /// Deletes the snapshot for a session.
    ///
    /// Deleting a session that was never saved is not an error.
    async fn delete(&self, session_id: SessionId) -> Result<()>;

    /// Returns the number of stored sessions.
    async fn count(&self) -> Result<usize>;
}
