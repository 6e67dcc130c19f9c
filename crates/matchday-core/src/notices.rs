//! User-facing notices
//!
//! Single-slot, dismissible surface for transient feedback. Showing a new
//! notice replaces the current one; every failure is reported exactly once.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

pub struct Notices {
    current: Arc<RwLock<Option<Notice>>>,
}

impl Notices {
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(NoticeKind::Error, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(NoticeKind::Success, message.into());
    }

    fn show(&self, kind: NoticeKind, message: String) {
        tracing::debug!(?kind, %message, "notice raised");
        *self.current.write() = Some(Notice {
            kind,
            message,
            raised_at: Utc::now(),
        });
    }

    pub fn current(&self) -> Option<Notice> {
        self.current.read().clone()
    }

    pub fn dismiss(&self) {
        *self.current.write() = None;
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Notices {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_replaces_current() {
        let notices = Notices::new();
        assert!(notices.current().is_none());

        notices.error("first");
        notices.error("second");

        let current = notices.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.kind, NoticeKind::Error);
    }

    #[test]
    fn test_dismiss_clears() {
        let notices = Notices::new();
        notices.success("done");

        notices.dismiss();
        assert!(notices.current().is_none());

        // Dismissing again is a no-op
        notices.dismiss();
    }
}
