//! Session store implementation
//!
//! Process-wide mapping from user id to session context. The outer map
//! lock is held only for lookups and inserts; every session sits behind
//! its own async mutex, which callers hold for the duration of a turn so
//! that rapid double-submits from one user serialize instead of losing
//! updates. Idle sessions are evicted after a TTL, both opportunistically
//! on access and by a background sweep.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::context::SessionContext;

struct SessionSlot {
    context: Arc<Mutex<SessionContext>>,
    last_access: DateTime<Utc>,
}

/// In-memory session store with TTL eviction
pub struct SessionStore {
    sessions: StdMutex<HashMap<i64, SessionSlot>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    /// Create a new store; sessions idle longer than `ttl_seconds` expire
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            sessions: StdMutex::new(HashMap::new()),
            ttl: chrono::Duration::seconds(ttl_seconds as i64),
        }
    }

    /// Get the session for a user, creating an empty one on first access.
    ///
    /// An expired session is replaced with a fresh one on the spot.
    pub fn get_or_create(&self, user_id: i64) -> Arc<Mutex<SessionContext>> {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().expect("session map poisoned");

        if let Some(slot) = sessions.get_mut(&user_id) {
            if now - slot.last_access <= self.ttl {
                slot.last_access = now;
                return Arc::clone(&slot.context);
            }
            debug!(user_id = user_id, "Session expired, creating a fresh one");
        }

        let context = Arc::new(Mutex::new(SessionContext::new(user_id)));
        sessions.insert(user_id, SessionSlot {
            context: Arc::clone(&context),
            last_access: now,
        });
        context
    }

    /// Remove a user's session; returns whether one existed
    pub fn remove(&self, user_id: i64) -> bool {
        let mut sessions = self.sessions.lock().expect("session map poisoned");
        let removed = sessions.remove(&user_id).is_some();
        if removed {
            debug!(user_id = user_id, "Removed session");
        }
        removed
    }

    /// Whether a live session exists for the user
    pub fn contains(&self, user_id: i64) -> bool {
        let now = Utc::now();
        let sessions = self.sessions.lock().expect("session map poisoned");
        sessions
            .get(&user_id)
            .map_or(false, |slot| now - slot.last_access <= self.ttl)
    }

    /// Number of sessions currently held, expired ones included
    pub fn session_count(&self) -> usize {
        self.sessions.lock().expect("session map poisoned").len()
    }

    /// Drop all sessions idle longer than the TTL
    pub fn cleanup_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().expect("session map poisoned");
        let before = sessions.len();
        sessions.retain(|_, slot| now - slot.last_access <= self.ttl);
        let cleaned = before - sessions.len();

        if cleaned > 0 {
            info!("Cleaned up {} expired sessions", cleaned);
        }
        cleaned
    }

    /// Get store statistics
    pub fn stats(&self) -> StoreStats {
        let now = Utc::now();
        let sessions = self.sessions.lock().expect("session map poisoned");
        let total_sessions = sessions.len();
        let expired_sessions = sessions
            .values()
            .filter(|slot| now - slot.last_access > self.ttl)
            .count();

        StoreStats {
            total_sessions,
            active_sessions: total_sessions - expired_sessions,
            expired_sessions,
        }
    }

    #[cfg(test)]
    pub(crate) fn backdate(&self, user_id: i64, seconds: i64) {
        let mut sessions = self.sessions.lock().expect("session map poisoned");
        if let Some(slot) = sessions.get_mut(&user_id) {
            slot.last_access = slot.last_access - chrono::Duration::seconds(seconds);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Store statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoreStats {
    pub total_sessions: usize,
    pub active_sessions: usize,
    pub expired_sessions: usize,
}

/// Session store with an automatic background cleanup task
#[derive(Debug)]
pub struct SessionStoreManager {
    store: Arc<SessionStore>,
    cleanup_interval: Duration,
    cleanup_handle: Option<tokio::task::JoinHandle<()>>,
}

impl SessionStoreManager {
    /// Create a manager around a store with the given sweep interval
    pub fn new(store: Arc<SessionStore>, cleanup_interval: Duration) -> Self {
        Self {
            store,
            cleanup_interval,
            cleanup_handle: None,
        }
    }

    /// Start the background cleanup task
    pub fn start_cleanup(&mut self) {
        if self.cleanup_handle.is_some() {
            warn!("Cleanup task is already running");
            return;
        }

        let store = Arc::clone(&self.store);
        let interval = self.cleanup_interval;

        let handle = tokio::spawn(async move {
            let mut cleanup_interval = tokio::time::interval(interval);

            loop {
                cleanup_interval.tick().await;

                let cleaned = store.cleanup_expired();
                if cleaned > 0 {
                    info!("Cleanup task removed {} expired sessions", cleaned);
                }
            }
        });

        self.cleanup_handle = Some(handle);
        info!("Started automatic cleanup task with interval {:?}", self.cleanup_interval);
    }

    /// Stop the background cleanup task
    pub fn stop_cleanup(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
            info!("Stopped automatic cleanup task");
        }
    }

    /// Get reference to the store
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }
}

impl Drop for SessionStoreManager {
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_or_create_returns_same_session() {
        let store = SessionStore::new(3600);

        let first = store.get_or_create(123);
        {
            let mut context = first.lock().await;
            context.push_user_message("hello");
        }

        let second = store.get_or_create(123);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.lock().await.messages.len(), 1);
        assert_eq!(store.session_count(), 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated_per_user() {
        let store = SessionStore::new(3600);

        let alice = store.get_or_create(1);
        alice.lock().await.push_user_message("I want a shirt");

        let bob = store.get_or_create(2);
        assert!(bob.lock().await.messages.is_empty());
        assert_eq!(store.session_count(), 2);
    }

    #[tokio::test]
    async fn test_remove_session() {
        let store = SessionStore::new(3600);
        store.get_or_create(55);

        assert!(store.contains(55));
        assert!(store.remove(55));
        assert!(!store.contains(55));
        assert!(!store.remove(55));
    }

    #[tokio::test]
    async fn test_expired_session_is_replaced_on_access() {
        let store = SessionStore::new(60);

        let stale = store.get_or_create(7);
        stale.lock().await.push_user_message("old message");
        store.backdate(7, 120);

        let fresh = store.get_or_create(7);
        assert!(!Arc::ptr_eq(&stale, &fresh));
        assert!(fresh.lock().await.messages.is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let store = SessionStore::new(60);
        store.get_or_create(1);
        store.get_or_create(2);
        store.get_or_create(3);
        store.backdate(1, 120);
        store.backdate(2, 120);

        let stats = store.stats();
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.expired_sessions, 2);

        assert_eq!(store.cleanup_expired(), 2);
        assert_eq!(store.session_count(), 1);
        assert!(store.contains(3));
    }

    #[tokio::test]
    async fn test_manager_cleanup_task() {
        let store = Arc::new(SessionStore::new(60));
        store.get_or_create(9);
        store.backdate(9, 120);

        let mut manager = SessionStoreManager::new(
            Arc::clone(&store),
            Duration::from_millis(10),
        );
        manager.start_cleanup();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.session_count(), 0);

        manager.stop_cleanup();
    }
}
