//! Matchday Core
//!
//! Central coordination layer for the Matchday client. All client-held
//! state (session, current route, pending notices) flows through here;
//! everything else lives behind the backend's REST contract.

mod app;
mod bracket;
mod config;
mod error;
mod events;
mod notices;

pub use app::{App, EventDetailsView, LogoutTrigger};
pub use bracket::rounds;
pub use config::Config;
pub use error::CoreError;
pub use events::{sort_events, sort_registrations, SortKey};
pub use notices::{Notice, NoticeKind, Notices};

// Re-export core components
pub use matchday_api::{
    ApiClient, ApiError, Event, Game, NewEvent, NewTeam, Registration, SignUpRequest, Team,
};
pub use matchday_navigation::{NavigationError, Route, Router};
pub use matchday_session::{
    AuthGate, AuthState, ExpiryWatcher, SessionError, SessionEvent, SessionManager, StoredSession,
    TokenStore, SKEW_GUARD_MS,
};
pub use matchday_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
