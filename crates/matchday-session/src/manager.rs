//! Session lifecycle manager
//!
//! Two states: `Authenticated` and `Unauthenticated`. A session begins on
//! successful sign-in and ends on explicit logout or detected expiry. The
//! watcher is armed and disarmed exactly when that status toggles.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use matchday_storage::Database;

use crate::gate::AuthGate;
use crate::token_store::{StoredSession, TokenStore};
use crate::watcher::ExpiryWatcher;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Authenticated,
    Unauthenticated,
}

/// Watcher-triggered notifications. User-initiated logout never produces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The stored session lapsed while the watcher was armed.
    Expired,
}

pub struct SessionManager {
    store: TokenStore,
    state: Arc<RwLock<AuthState>>,
    watcher: ExpiryWatcher,
    events: UnboundedSender<SessionEvent>,
}

impl SessionManager {
    /// Create a manager plus the receiving end of its expiry notifications.
    pub fn new(db: Database) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();

        let manager = Self {
            store: TokenStore::new(db),
            state: Arc::new(RwLock::new(AuthState::Unauthenticated)),
            watcher: ExpiryWatcher::new(),
            events,
        };

        (manager, rx)
    }

    /// Restore session state on process start.
    ///
    /// The remaining watcher delay is always recomputed from the persisted
    /// expiry instant, never carried over from a previous countdown. A token
    /// that lapsed while the process was down gets an immediate firing.
    pub fn restore(&self) -> Result<AuthState> {
        match self.store.read()? {
            Some(session) => {
                *self.state.write() = AuthState::Authenticated;
                self.watcher
                    .arm(self.store.clone(), self.events.clone(), session.expires_at);

                tracing::info!(expires_at = session.expires_at, "restored persisted session");
                Ok(AuthState::Authenticated)
            }
            None => {
                *self.state.write() = AuthState::Unauthenticated;
                Ok(AuthState::Unauthenticated)
            }
        }
    }

    /// Start a session from a freshly issued token and arm the watcher.
    pub fn begin_session(&self, token: &str, lifetime_secs: i64) -> Result<StoredSession> {
        let session = self.store.save(token, lifetime_secs)?;

        *self.state.write() = AuthState::Authenticated;
        self.watcher
            .arm(self.store.clone(), self.events.clone(), session.expires_at);

        tracing::info!(expires_at = session.expires_at, "session started");
        Ok(session)
    }

    /// Tear the session down: clear the store and disarm the watcher.
    /// Idempotent — ending an already-ended session is a no-op.
    pub fn end_session(&self) -> Result<()> {
        self.store.clear()?;
        self.watcher.disarm();
        *self.state.write() = AuthState::Unauthenticated;

        tracing::info!("session ended");
        Ok(())
    }

    pub fn state(&self) -> AuthState {
        *self.state.read()
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// The presence-only gate used for protected navigation.
    pub fn gate(&self) -> AuthGate {
        AuthGate::new(self.store.clone())
    }

    pub fn watcher(&self) -> &ExpiryWatcher {
        &self.watcher
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            state: Arc::clone(&self.state),
            watcher: self.watcher.clone(),
            events: self.events.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn manager() -> (SessionManager, UnboundedReceiver<SessionEvent>) {
        SessionManager::new(Database::open_in_memory().unwrap())
    }

    #[tokio::test]
    async fn test_begin_session_arms_watcher() {
        let (mgr, _rx) = manager();
        assert_eq!(mgr.state(), AuthState::Unauthenticated);

        mgr.begin_session("tok-1", 3600).unwrap();

        assert_eq!(mgr.state(), AuthState::Authenticated);
        assert!(mgr.watcher().is_armed());
        assert!(mgr.gate().allows());
    }

    #[tokio::test]
    async fn test_end_session_disarms_and_clears() {
        let (mgr, _rx) = manager();
        mgr.begin_session("tok-1", 3600).unwrap();

        mgr.end_session().unwrap();

        assert_eq!(mgr.state(), AuthState::Unauthenticated);
        assert!(!mgr.watcher().is_armed());
        assert!(mgr.store().read().unwrap().is_none());

        // Ending again is a no-op
        mgr.end_session().unwrap();
    }

    #[tokio::test]
    async fn test_lapsed_session_emits_event() {
        let (mgr, mut rx) = manager();
        mgr.begin_session("tok-1", 0).unwrap();

        let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("watcher should fire")
            .expect("channel should stay open");
        assert_eq!(event, SessionEvent::Expired);
    }

    #[tokio::test]
    async fn test_manual_logout_suppresses_event() {
        let (mgr, mut rx) = manager();
        mgr.begin_session("tok-1", 0).unwrap();

        mgr.end_session().unwrap();

        let fired = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(fired.is_err(), "no event after a manual logout");
    }

    #[tokio::test]
    async fn test_restore_with_persisted_token() {
        let db = Database::open_in_memory().unwrap();
        TokenStore::new(db.clone()).save("tok-1", 3600).unwrap();

        let (mgr, _rx) = SessionManager::new(db);
        let state = mgr.restore().unwrap();

        assert_eq!(state, AuthState::Authenticated);
        assert!(mgr.watcher().is_armed());
    }

    #[tokio::test]
    async fn test_restore_without_token() {
        let (mgr, _rx) = manager();
        let state = mgr.restore().unwrap();

        assert_eq!(state, AuthState::Unauthenticated);
        assert!(!mgr.watcher().is_armed());
    }

    #[tokio::test]
    async fn test_restore_with_lapsed_token_fires_immediately() {
        // A token that expired while the process was down still gets its
        // firing: the delay clamps to zero instead of being skipped.
        let db = Database::open_in_memory().unwrap();
        TokenStore::new(db.clone()).save("tok-1", 0).unwrap();

        let (mgr, mut rx) = SessionManager::new(db);
        mgr.restore().unwrap();

        let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("watcher should fire")
            .expect("channel should stay open");
        assert_eq!(event, SessionEvent::Expired);
    }
}
