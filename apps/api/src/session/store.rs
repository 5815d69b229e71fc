//! Process-wide registry of live sessions.
//!
//! Each session owns its own mutex. Holding it for the whole of an event
//! keeps one session strictly sequential; different sessions never block on
//! each other beyond the brief map lookup.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use super::state::SessionState;

pub type SessionHandle = Arc<Mutex<SessionState>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session with every slot empty.
    pub async fn create(&self) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(SessionState::new()));
        self.sessions.write().await.insert(id, handle.clone());
        debug!(session_id = %id, "Session created");
        (id, handle)
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Locks a live session for the duration of one event and marks it active.
    pub async fn lock(&self, id: Uuid) -> Option<OwnedMutexGuard<SessionState>> {
        let handle = self.get(id).await?;
        self.lock_handle(id, handle).await
    }

    /// Locks `handle`, then confirms it is still the registered session for
    /// `id`. Eviction may run between lookup and lock; once the guard is held
    /// the sweeper skips the session.
    async fn lock_handle(
        &self,
        id: Uuid,
        handle: SessionHandle,
    ) -> Option<OwnedMutexGuard<SessionState>> {
        let mut guard = handle.clone().lock_owned().await;
        let registered = self
            .sessions
            .read()
            .await
            .get(&id)
            .is_some_and(|current| Arc::ptr_eq(current, &handle));
        if !registered {
            debug!(session_id = %id, "Session ended before it could be locked");
            return None;
        }
        guard.touch();
        Some(guard)
    }

    /// Ends a session. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            debug!(session_id = %id, "Session removed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions idle for longer than `max_idle`.
    ///
    /// A session whose mutex is held is mid-event and therefore not idle.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(state) => state.last_active >= cutoff,
            Err(_) => true,
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_remove() {
        let store = SessionStore::new();
        let (id, _) = store.create().await;
        assert!(store.get(id).await.is_some());
        assert_eq!(store.len().await, 1);

        assert!(store.remove(id).await);
        assert!(store.get(id).await.is_none());
        assert!(!store.remove(id).await);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let (a, handle_a) = store.create().await;
        let (b, _) = store.create().await;
        assert_ne!(a, b);

        handle_a.lock().await.set_text("only in a");

        let state_b = store.get(b).await.unwrap();
        assert!(state_b.lock().await.text.is_empty());
    }

    #[tokio::test]
    async fn test_evict_idle_only_drops_stale_sessions() {
        let store = SessionStore::new();
        let (stale, stale_handle) = store.create().await;
        let (fresh, _) = store.create().await;

        stale_handle.lock().await.last_active = Utc::now() - Duration::hours(2);

        let evicted = store.evict_idle(Duration::minutes(30)).await;
        assert_eq!(evicted, 1);
        assert!(store.get(stale).await.is_none());
        assert!(store.get(fresh).await.is_some());
    }

    #[tokio::test]
    async fn test_lock_marks_session_active() {
        let store = SessionStore::new();
        let (id, handle) = store.create().await;
        handle.lock().await.last_active = Utc::now() - Duration::hours(2);

        let guard = store.lock(id).await.unwrap();
        assert!(guard.last_active > Utc::now() - Duration::minutes(1));
        drop(guard);

        assert_eq!(store.evict_idle(Duration::minutes(30)).await, 0);
    }

    #[tokio::test]
    async fn test_session_evicted_between_lookup_and_lock_is_gone() {
        let store = SessionStore::new();
        let (id, handle) = store.create().await;
        handle.lock().await.last_active = Utc::now() - Duration::hours(2);

        let looked_up = store.get(id).await.unwrap();
        assert_eq!(store.evict_idle(Duration::minutes(30)).await, 1);

        assert!(store.lock_handle(id, looked_up).await.is_none());
        assert!(store.lock(id).await.is_none());
    }

    #[tokio::test]
    async fn test_evict_skips_busy_sessions() {
        let store = SessionStore::new();
        let (id, handle) = store.create().await;
        let mut guard = handle.lock().await;
        guard.last_active = Utc::now() - Duration::hours(2);

        assert_eq!(store.evict_idle(Duration::minutes(1)).await, 0);
        drop(guard);
        assert!(store.get(id).await.is_some());
    }
}
