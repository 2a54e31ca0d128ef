//! Effects produced by state transitions

use super::event::GenerationPurpose;
use super::state::{Difficulty, Subject};

/// A row of choice buttons shown under a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub choices: Vec<String>,
}

impl Keyboard {
    pub fn subjects() -> Self {
        Self {
            choices: Subject::ALL.iter().map(|s| s.label().to_string()).collect(),
        }
    }

    pub fn difficulties() -> Self {
        Self {
            choices: Difficulty::ALL
                .iter()
                .map(|d| d.label().to_string())
                .collect(),
        }
    }
}

/// Outbound message instruction for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a message to the user
    Reply(Reply),

    /// Call the generation provider; the result comes back as
    /// `Event::GenerationComplete` with the same purpose
    Generate {
        purpose: GenerationPurpose,
        prompt: String,
    },

    /// Add one correct-answer point for the user
    AwardPoint,

    /// Read the user's points and reply with them
    ReportPoints,
}

impl Effect {
    pub fn reply(text: impl Into<String>) -> Self {
        Effect::Reply(Reply::text(text))
    }

    pub fn reply_with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Effect::Reply(Reply::with_keyboard(text, keyboard))
    }
}
