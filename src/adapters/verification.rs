//! Expiring in-process store for signups awaiting email verification.
//!
//! Owned entirely by the verification workflow: entries are keyed by email,
//! replaced on re-signup, consumed on successful verification and evicted
//! once their deadline passes. Nothing here survives a restart, which is
//! acceptable because an unverified signup can simply be repeated.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::user::PendingSignup;
use crate::ports::PendingSignupStore;

const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

struct Entry {
    signup: PendingSignup,
    deadline: Instant,
}

pub struct ExpiringSignupStore {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl ExpiringSignupStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        // A poisoned lock only happens if an insert panicked; the map is
        // still structurally sound, so keep serving.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ExpiringSignupStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PendingSignupStore for ExpiringSignupStore {
    async fn put(&self, signup: PendingSignup) {
        let mut entries = self.lock();
        // Opportunistic sweep keeps abandoned signups from accumulating.
        let now = Instant::now();
        entries.retain(|_, e| e.deadline > now);
        entries.insert(
            signup.email.clone(),
            Entry {
                signup,
                deadline: now + self.ttl,
            },
        );
    }

    async fn take(&self, email: &str) -> Option<PendingSignup> {
        let mut entries = self.lock();
        let entry = entries.remove(email)?;
        if entry.deadline <= Instant::now() {
            return None;
        }
        Some(entry.signup)
    }

    async fn get(&self, email: &str) -> Option<PendingSignup> {
        let entries = self.lock();
        let entry = entries.get(email)?;
        if entry.deadline <= Instant::now() {
            return None;
        }
        Some(entry.signup.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn signup(email: &str) -> PendingSignup {
        PendingSignup {
            username: "sam".into(),
            email: email.into(),
            password_hash: "salt$mac".into(),
            dob: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn take_consumes_the_entry() {
        let store = ExpiringSignupStore::new();
        store.put(signup("a@b.c")).await;
        assert!(store.take("a@b.c").await.is_some());
        assert!(store.take("a@b.c").await.is_none());
    }

    #[tokio::test]
    async fn expired_entries_are_gone() {
        let store = ExpiringSignupStore::with_ttl(Duration::ZERO);
        store.put(signup("a@b.c")).await;
        assert!(store.get("a@b.c").await.is_none());
        assert!(store.take("a@b.c").await.is_none());
    }

    #[tokio::test]
    async fn re_signup_replaces_the_entry() {
        let store = ExpiringSignupStore::new();
        store.put(signup("a@b.c")).await;
        let mut second = signup("a@b.c");
        second.username = "samuel".into();
        store.put(second).await;
        assert_eq!(store.take("a@b.c").await.unwrap().username, "samuel");
    }
}
