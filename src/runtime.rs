//! Runtime for executing dialogues
//!
//! Loads a user's dialogue state, runs it through the pure transition
//! function and performs the resulting effects against the injected
//! session store, points ledger, generator and messenger.

mod executor;
mod memory;
pub mod traits;


pub use executor::DialogueRuntime;
pub use memory::{InMemoryPointsLedger, InMemorySessionStore};
pub use traits::*;

use crate::generation::GeminiClient;
use crate::telegram::TelegramMessenger;
use std::fmt;

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime =
    DialogueRuntime<InMemorySessionStore, InMemoryPointsLedger, GeminiClient, TelegramMessenger>;

/// Telegram user; owns a points entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chat that replies are delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Chat(pub i64);

impl fmt::Display for Chat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a session: one user talking in one chat
///
/// Members of a group chat each get their own dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey {
    pub chat: Chat,
    pub user: UserId,
}

impl SessionKey {
    pub const fn new(chat: Chat, user: UserId) -> Self {
        Self { chat, user }
    }

    /// Private chats share their id with the user
    #[allow(dead_code)] // Used by tests
    pub const fn private(user: UserId) -> Self {
        Self::new(Chat(user.0), user)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.chat, self.user)
    }
}
