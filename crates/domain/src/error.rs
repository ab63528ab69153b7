//! Funnel error types.

use common::SessionId;
use session_store::SessionStoreError;
use thiserror::Error;

/// Errors that can occur when dispatching funnel actions.
///
/// The aggregate's actions themselves are infallible; errors only arise at
/// the service seam (missing sessions, gated navigation, persistence).
#[derive(Debug, Error)]
pub enum FunnelError {
    /// An error occurred in the session store.
    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),

    /// No snapshot exists for the session id.
    #[error("Session not found: {id}")]
    SessionNotFound { id: SessionId },

    /// The session has no identity yet; `start_session` was never called.
    #[error("Session has not been started")]
    SessionNotStarted,

    /// Forward navigation was refused because the current step is missing
    /// required fields.
    #[error("Step {step} is incomplete")]
    StepIncomplete { step: u8 },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
