//! Session store
//!
//! In-process store of conversation state, one independently locked entry per
//! (user, chat) pair. Holding an entry's lock across an event serializes
//! concurrent events for the same pair; entries never block each other.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;

use super::context::{SessionKey, SessionState};

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<SessionKey, Arc<Mutex<SessionState>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the entry for a key
    async fn entry(&self, key: SessionKey) -> Arc<Mutex<SessionState>> {
        if let Some(entry) = self.entries.read().await.get(&key) {
            return Arc::clone(entry);
        }

        let mut entries = self.entries.write().await;
        Arc::clone(entries.entry(key).or_default())
    }

    /// Lock the session for exclusive processing of one event.
    ///
    /// The guard is owned, so it may be held across awaits; events for other
    /// keys proceed unhindered.
    pub async fn lock(&self, key: SessionKey) -> OwnedMutexGuard<SessionState> {
        self.entry(key).await.lock_owned().await
    }

    /// Snapshot of a session, if one exists. Never creates an entry.
    pub async fn peek(&self, key: SessionKey) -> Option<SessionState> {
        let entry = {
            let entries = self.entries.read().await;
            entries.get(&key).map(Arc::clone)?
        };
        let state = entry.lock().await;
        Some(state.clone())
    }

    /// Whether an active conversation exists for this key
    pub async fn has_active(&self, key: SessionKey) -> bool {
        self.peek(key).await.map(|s| s.is_active()).unwrap_or(false)
    }

    /// Atomic read-modify-write against a single entry
    pub async fn update<F, R>(&self, key: SessionKey, mutator: F) -> R
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let mut state = self.lock(key).await;
        mutator(&mut state)
    }

    /// Drop the entry, returning the conversation to its implicit initial state
    pub async fn clear(&self, key: SessionKey) {
        let removed = self.entries.write().await.remove(&key);
        if removed.is_some() {
            debug!(user_id = key.user_id, chat_id = key.chat_id, "Session cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConversationType;
    use crate::state::context::ConversationStep;

    #[tokio::test]
    async fn update_creates_and_mutates_entry() {
        let store = SessionStore::new();
        let key = SessionKey::new(1, 10);

        store
            .update(key, |state| state.start(ConversationType::RoutesBetween))
            .await;

        let snapshot = store.peek(key).await.unwrap();
        assert_eq!(snapshot.step, Some(ConversationStep::AwaitingDeparture));
    }

    #[tokio::test]
    async fn clear_removes_entry() {
        let store = SessionStore::new();
        let key = SessionKey::new(1, 10);

        store
            .update(key, |state| state.start(ConversationType::RoutesBetween))
            .await;
        store.clear(key).await;

        assert!(store.peek(key).await.is_none());
        assert!(!store.has_active(key).await);
    }

    #[tokio::test]
    async fn entries_are_independent() {
        let store = SessionStore::new();
        let first = SessionKey::new(1, 10);
        let second = SessionKey::new(2, 10);

        // Hold one entry locked while touching another
        let guard = store.lock(first).await;
        store
            .update(second, |state| state.start(ConversationType::RouteStations))
            .await;
        drop(guard);

        assert!(store.has_active(second).await);
        assert!(!store.has_active(first).await);
    }

    #[tokio::test]
    async fn same_key_updates_serialize() {
        let store = SessionStore::new();
        let key = SessionKey::new(7, 7);

        store
            .update(key, |state| {
                state.start(ConversationType::RoutesBetween);
                state.departure_station = Some(String::new());
            })
            .await;

        let mut tasks = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .update(key, |state| {
                        let current = state.departure_station.take().unwrap_or_default();
                        state.departure_station = Some(format!("{}x", current));
                    })
                    .await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let snapshot = store.peek(key).await.unwrap();
        assert_eq!(snapshot.departure_station.unwrap().len(), 50);
    }
}
