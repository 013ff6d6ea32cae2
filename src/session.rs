//! Per-user session state held for the lifetime of the process.
//!
//! Nothing here is persisted: a restart forgets every language choice and
//! every first-seen timestamp.

use crate::i18n::Language;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Telegram user identifier
pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: UserId,
    /// Unset until the user presses a language button
    pub language: Option<Language>,
    /// Set once by the first /start, never changed afterwards
    pub first_seen_at: Option<DateTime<Utc>>,
}

impl UserSession {
    fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            language: None,
            first_seen_at: None,
        }
    }
}

/// In-memory session store.
///
/// Cloning is cheap and every clone shares the same map. A single lock
/// guards the whole map; every operation touches one key and holds the lock
/// only for that touch.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<UserId, UserSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // No write leaves an entry half-updated; poisoned guards are recovered.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<UserId, UserSession>> {
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<UserId, UserSession>> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Selected language for a user; `None` for unknown users too.
    pub fn get_language(&self, user_id: UserId) -> Option<Language> {
        self.read().get(&user_id).and_then(|s| s.language)
    }

    /// Record a language choice, creating the session if needed.
    pub fn set_language(&self, user_id: UserId, language: Language) {
        self.write()
            .entry(user_id)
            .or_insert_with(|| UserSession::new(user_id))
            .language = Some(language);
    }

    /// Stamp the first-seen time.
    ///
    /// Returns `true` only when this call set the timestamp; an existing
    /// timestamp is never overwritten.
    pub fn touch_first_seen(&self, user_id: UserId, now: DateTime<Utc>) -> bool {
        let mut sessions = self.write();
        let session = sessions
            .entry(user_id)
            .or_insert_with(|| UserSession::new(user_id));

        if session.first_seen_at.is_some() {
            return false;
        }
        session.first_seen_at = Some(now);
        true
    }

    /// Snapshot of every session, in no particular order.
    pub fn all_sessions(&self) -> Vec<UserSession> {
        self.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
