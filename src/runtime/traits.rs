//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use super::{Chat, SessionKey, UserId};
use crate::state_machine::{DialogueState, Reply};
use async_trait::async_trait;
use std::sync::Arc;

/// Dialogue state per user and chat
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current state, `Idle` for sessions never seen before
    async fn load(&self, key: SessionKey) -> Result<DialogueState, String>;

    /// Replace the session's state
    async fn save(&self, key: SessionKey, state: &DialogueState) -> Result<(), String>;
}

/// Per-user correct-answer counter
#[async_trait]
pub trait PointsLedger: Send + Sync {
    /// Add one point atomically and return the new total
    async fn increment(&self, user: UserId) -> Result<u64, String>;

    /// Current total, 0 for users never seen before
    async fn get(&self, user: UserId) -> Result<u64, String>;
}

/// Outbound channel to a chat
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, chat: Chat, reply: &Reply) -> Result<(), String>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn load(&self, key: SessionKey) -> Result<DialogueState, String> {
        (**self).load(key).await
    }

    async fn save(&self, key: SessionKey, state: &DialogueState) -> Result<(), String> {
        (**self).save(key, state).await
    }
}

#[async_trait]
impl<T: PointsLedger + ?Sized> PointsLedger for Arc<T> {
    async fn increment(&self, user: UserId) -> Result<u64, String> {
        (**self).increment(user).await
    }

    async fn get(&self, user: UserId) -> Result<u64, String> {
        (**self).get(user).await
    }
}

#[async_trait]
impl<T: Messenger + ?Sized> Messenger for Arc<T> {
    async fn send(&self, chat: Chat, reply: &Reply) -> Result<(), String> {
        (**self).send(chat, reply).await
    }
}
