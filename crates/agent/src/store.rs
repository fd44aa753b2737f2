//! Session table
//!
//! Sessions are created lazily on first event and serialized per session by
//! a `tokio::sync::Mutex` (cycles await collaborator calls while holding the
//! lock). Cross-session cycles run fully in parallel. The store never grows
//! unboundedly: callers evict idle sessions on their own schedule via
//! [`SessionStore::evict_idle`].

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

use crate::session::SessionState;

/// One session slot: serialized state plus idle tracking
pub struct SessionHandle {
    state: tokio::sync::Mutex<SessionState>,
    last_seen: parking_lot::Mutex<Instant>,
}

impl SessionHandle {
    fn new() -> Self {
        Self {
            state: tokio::sync::Mutex::new(SessionState::default()),
            last_seen: parking_lot::Mutex::new(Instant::now()),
        }
    }

    /// Lock the session state for one processing cycle
    pub async fn state(&self) -> tokio::sync::MutexGuard<'_, SessionState> {
        self.state.lock().await
    }

    fn touch(&self) {
        *self.last_seen.lock() = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_seen.lock().elapsed()
    }
}

/// Process-wide session table with create-on-first-event semantics
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Arc<SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch or create the session for an identifier, refreshing its idle
    /// clock
    pub fn get_or_create(&self, session_id: &str) -> Arc<SessionHandle> {
        let handle = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::info!(session_id, "session created");
                Arc::new(SessionHandle::new())
            })
            .clone();
        handle.touch();
        handle
    }

    /// Drop sessions idle longer than `max_idle`, returning how many were
    /// evicted. In-flight cycles keep their `Arc` alive until they finish.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, handle| handle.idle_for() < max_idle);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, "idle sessions evicted");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_on_first_event_reuses_existing() {
        let store = SessionStore::new();
        let a = store.get_or_create("call-1");
        let b = store.get_or_create("call-1");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(), 1);

        a.state().await.phone = "5125551234".to_string();
        assert_eq!(b.state().await.phone, "5125551234");
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_evicted() {
        let store = SessionStore::new();
        store.get_or_create("old");
        tokio::time::advance(Duration::from_secs(120)).await;
        store.get_or_create("fresh");

        let evicted = store.evict_idle(Duration::from_secs(60));
        assert_eq!(evicted, 1);
        assert_eq!(store.len(), 1);
        // Touching recreates on demand
        store.get_or_create("old");
        assert_eq!(store.len(), 2);
    }
}
