//! In-memory session store and points ledger
//!
//! Both live for the process lifetime only.

use super::traits::{PointsLedger, SessionStore};
use super::{SessionKey, UserId};
use crate::state_machine::DialogueState;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Sessions keyed by chat and user; idle sessions have no entry
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionKey, DialogueState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions with a dialogue in progress
    #[allow(dead_code)] // Used by tests
    pub async fn active_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: SessionKey) -> Result<DialogueState, String> {
        Ok(self
            .sessions
            .lock()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, key: SessionKey, state: &DialogueState) -> Result<(), String> {
        let mut sessions = self.sessions.lock().await;
        if state.is_active() {
            sessions.insert(key, state.clone());
        } else {
            sessions.remove(&key);
        }
        Ok(())
    }
}

/// Points keyed by user, shared across every chat they talk in
#[derive(Default)]
pub struct InMemoryPointsLedger {
    points: Mutex<HashMap<UserId, u64>>,
}

impl InMemoryPointsLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PointsLedger for InMemoryPointsLedger {
    async fn increment(&self, user: UserId) -> Result<u64, String> {
        let mut points = self.points.lock().await;
        let total = points.entry(user).or_insert(0);
        *total = total.saturating_add(1);
        Ok(*total)
    }

    async fn get(&self, user: UserId) -> Result<u64, String> {
        Ok(self.points.lock().await.get(&user).copied().unwrap_or(0))
    }
}
