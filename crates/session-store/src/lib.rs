//! Durable snapshot persistence for booking sessions.
//!
//! The in-memory session is always the authority; snapshots exist so a
//! reloaded page can seed a fresh session from the last saved state. Real
//! deployments implement [`SessionStore`] over a key-value or document
//! backend; [`InMemorySessionStore`] backs tests and the dev server.

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod store;

pub use common::SessionId;
pub use error::{Result, SessionStoreError};
pub use memory::InMemorySessionStore;
pub use snapshot::SessionSnapshot;
pub use store::SessionStore;
