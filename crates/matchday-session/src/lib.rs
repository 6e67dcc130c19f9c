//! Matchday Session Management
//!
//! The client-held record of an authenticated user's bearer token and its
//! expiry instant. There is exactly one session per profile: it begins at
//! sign-in, ends on explicit logout or when the expiry watcher fires, and
//! is absent otherwise. The token survives restarts via the storage layer.

mod error;
mod gate;
mod manager;
mod token_store;
mod watcher;

pub use error::SessionError;
pub use gate::AuthGate;
pub use manager::{AuthState, SessionEvent, SessionManager};
pub use token_store::{StoredSession, TokenStore, SKEW_GUARD_MS};
pub use watcher::ExpiryWatcher;

pub type Result<T> = std::result::Result<T, SessionError>;
