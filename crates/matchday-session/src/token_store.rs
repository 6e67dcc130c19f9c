//! Durable token storage

use chrono::Utc;

use matchday_storage::Database;

use crate::Result;

/// Guard band applied on both sides of the expiry instant: the watcher fires
/// this early, and freshness checks treat the last stretch as already lapsed,
/// so nothing races the exact boundary.
pub const SKEW_GUARD_MS: i64 = 2_000;

const KEY_TOKEN: &str = "token";
/// Stores the *absolute* expiry instant in epoch millis. The key name reads
/// like a duration; it is kept as-is for storage compatibility.
const KEY_EXPIRES: &str = "expiresIn";

/// The persisted session record: bearer token plus its expiry instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    /// Absolute expiry instant, epoch millis.
    pub expires_at: i64,
}

/// Durable holder of the current access token. Both fields are written and
/// cleared together; a record missing either one counts as logged out.
#[derive(Clone)]
pub struct TokenStore {
    db: Database,
}

impl TokenStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist a freshly issued token. The expiry instant is computed once,
    /// here, from the server-declared lifetime; it is never recomputed from
    /// elapsed client time afterwards.
    pub fn save(&self, token: &str, lifetime_secs: i64) -> Result<StoredSession> {
        let expires_at = Utc::now().timestamp_millis() + lifetime_secs * 1000;

        self.db.set_setting(KEY_TOKEN, token)?;
        self.db.set_setting(KEY_EXPIRES, &expires_at.to_string())?;

        Ok(StoredSession {
            token: token.to_string(),
            expires_at,
        })
    }

    /// Remove both fields. Idempotent.
    pub fn clear(&self) -> Result<()> {
        self.db.delete_setting(KEY_TOKEN)?;
        self.db.delete_setting(KEY_EXPIRES)?;
        Ok(())
    }

    /// Pure lookup, no side effects. Returns `None` when either field is
    /// missing or the stored expiry does not parse.
    pub fn read(&self) -> Result<Option<StoredSession>> {
        let token = self.db.get_setting(KEY_TOKEN)?;
        let expires = self.db.get_setting(KEY_EXPIRES)?;

        match (token, expires) {
            (Some(token), Some(raw)) => match raw.parse::<i64>() {
                Ok(expires_at) => Ok(Some(StoredSession { token, expires_at })),
                Err(_) => {
                    tracing::warn!(value = %raw, "unparseable expiry in store, treating as logged out");
                    Ok(None)
                }
            },
            _ => Ok(None),
        }
    }

    /// Whether the stored session has lapsed. An absent session counts as
    /// expired.
    pub fn is_expired(&self) -> Result<bool> {
        Ok(match self.read()? {
            Some(session) => Utc::now().timestamp_millis() + SKEW_GUARD_MS > session.expires_at,
            None => true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TokenStore {
        TokenStore::new(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_save_then_read_returns_session() {
        let store = store();
        let before = Utc::now().timestamp_millis();

        let saved = store.save("tok-1", 3600).unwrap();

        let read = store.read().unwrap().expect("session should be present");
        assert_eq!(read, saved);
        assert_eq!(read.token, "tok-1");
        // expires_at ≈ now + 3_600_000
        assert!(read.expires_at >= before + 3_600_000);
        assert!(read.expires_at <= Utc::now().timestamp_millis() + 3_600_000);
    }

    #[test]
    fn test_fresh_token_is_not_expired() {
        let store = store();
        store.save("tok-1", 3600).unwrap();

        assert!(!store.is_expired().unwrap());
    }

    #[test]
    fn test_absent_session_counts_as_expired() {
        let store = store();

        assert!(store.read().unwrap().is_none());
        assert!(store.is_expired().unwrap());
    }

    #[test]
    fn test_clear_makes_session_expired() {
        let store = store();
        store.save("tok-1", 3600).unwrap();

        store.clear().unwrap();

        assert!(store.read().unwrap().is_none());
        assert!(store.is_expired().unwrap());

        // Clearing again is a no-op
        store.clear().unwrap();
    }

    #[test]
    fn test_token_inside_guard_band_is_expired() {
        let store = store();
        // One second of lifetime sits inside the 2s guard band.
        store.save("tok-1", 1).unwrap();

        assert!(store.is_expired().unwrap());
    }

    #[test]
    fn test_partial_record_counts_as_logged_out() {
        let db = Database::open_in_memory().unwrap();
        let store = TokenStore::new(db.clone());

        // Only one of the two fields present.
        db.set_setting("token", "tok-1").unwrap();

        assert!(store.read().unwrap().is_none());
        assert!(store.is_expired().unwrap());
    }

    #[test]
    fn test_corrupt_expiry_counts_as_logged_out() {
        let db = Database::open_in_memory().unwrap();
        let store = TokenStore::new(db.clone());

        db.set_setting("token", "tok-1").unwrap();
        db.set_setting("expiresIn", "not-a-number").unwrap();

        assert!(store.read().unwrap().is_none());
    }
}
