use chrono::{DateTime, Utc};
use common::SessionId;
use serde::{Deserialize, Serialize};

/// A snapshot of a booking session's state.
///
/// Snapshots are written after every applied action and seed a fresh
/// in-memory session on reload. The stored subset is whatever the session
/// serializes to: current step, form data, pricing, recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The session this snapshot belongs to.
    pub session_id: SessionId,

    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,

    /// The serialized session state.
    pub state: serde_json::Value,
}

impl SessionSnapshot {
    /// Creates a new snapshot from raw JSON state.
    pub fn new(session_id: SessionId, state: serde_json::Value) -> Self {
        Self {
            session_id,
            taken_at: Utc::now(),
            state,
        }
    }

    /// Creates a snapshot from a serializable state.
    pub fn from_state<T: Serialize>(
        session_id: SessionId,
        state: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            session_id,
            taken_at: Utc::now(),
            state: serde_json::to_value(state)?,
        })
    }

    /// Deserializes the snapshot state into a concrete type.
    pub fn into_state<T: for<'de> Deserialize<'de>>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.state)
    }

    /// Gets a reference to the state as JSON.
    pub fn state_ref(&self) -> &serde_json::Value {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestState {
        current_step: u8,
        package_key: Option<String>,
    }

    #[test]
    fn snapshot_new() {
        let id = SessionId::new();
        let state = serde_json::json!({"current_step": 2});

        let snapshot = SessionSnapshot::new(id, state.clone());

        assert_eq!(snapshot.session_id, id);
        assert_eq!(snapshot.state, state);
    }

    #[test]
    fn snapshot_from_state_and_into_state() {
        let id = SessionId::new();
        let original = TestState {
            current_step: 3,
            package_key: Some("signature".to_string()),
        };

        let snapshot = SessionSnapshot::from_state(id, &original).unwrap();

        let restored: TestState = snapshot.into_state().unwrap();
        assert_eq!(restored, original);
    }
}
