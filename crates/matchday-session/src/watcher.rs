//! One-shot expiry watcher
//!
//! A single cancellable task armed while a session is active. It sleeps
//! until shortly before the known expiry instant, re-checks the store, and
//! emits an expiry event if the session has in fact lapsed. It is not a
//! repeating interval: one firing per armed period.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::manager::SessionEvent;
use crate::token_store::{TokenStore, SKEW_GUARD_MS};

pub struct ExpiryWatcher {
    handle: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl ExpiryWatcher {
    pub fn new() -> Self {
        Self {
            handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Schedule a single firing shortly before `expires_at` (epoch millis).
    /// Re-arming replaces any previously scheduled firing.
    ///
    /// A non-positive remaining delay still schedules the firing at zero, so
    /// an already-lapsed token is never missed.
    pub fn arm(&self, store: TokenStore, events: UnboundedSender<SessionEvent>, expires_at: i64) {
        self.disarm();

        let delay = remaining_delay(expires_at, Utc::now().timestamp_millis());
        tracing::debug!(delay_ms = delay.as_millis() as u64, "expiry watcher armed");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // Re-check against the store. A manual logout may already have
            // cleared the session, in which case firing must be a no-op.
            match store.read() {
                Ok(Some(_)) => match store.is_expired() {
                    Ok(true) => {
                        tracing::info!("session expiry detected");
                        let _ = events.send(SessionEvent::Expired);
                    }
                    Ok(false) => {}
                    Err(e) => tracing::warn!(error = %e, "expiry re-check failed"),
                },
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "expiry re-check failed"),
            }
        });

        *self.handle.lock() = Some(handle);
    }

    /// Cancel the scheduled firing, if any. Idempotent.
    pub fn disarm(&self) {
        if let Some(handle) = self.handle.lock().take() {
            handle.abort();
            tracing::debug!("expiry watcher disarmed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Default for ExpiryWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ExpiryWatcher {
    fn clone(&self) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
        }
    }
}

/// Delay until the watcher should fire: the guard band ahead of the expiry
/// instant, clamped to zero.
pub(crate) fn remaining_delay(expires_at: i64, now: i64) -> Duration {
    let delay = expires_at - now - SKEW_GUARD_MS;
    Duration::from_millis(delay.max(0) as u64)
}
