use thiserror::Error;

/// Errors that can occur when interacting with the session store.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// The backing store failed (connection, timeout, quota, ...).
    #[error("Backend error: {0}")]
    Backend(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, SessionStoreError>;
