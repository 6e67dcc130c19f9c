//! Route-level authentication gate

use crate::token_store::TokenStore;

/// Presence-only predicate consulted on every protected navigation.
///
/// The gate never checks freshness: an expired-but-still-present token passes
/// until the expiry watcher fires and clears it. That window is a known race
/// between "authorized" and "authenticated-and-fresh", kept as-is.
#[derive(Clone)]
pub struct AuthGate {
    store: TokenStore,
}

impl AuthGate {
    pub fn new(store: TokenStore) -> Self {
        Self { store }
    }

    /// Whether navigation to a protected route is allowed.
    pub fn allows(&self) -> bool {
        match self.store.read() {
            Ok(Some(session)) => !session.token.is_empty(),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "auth gate could not read token store");
                false
            }
        }
    }
}
