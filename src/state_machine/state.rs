//! Dialogue state types

use std::fmt;

// ============================================================================
// Choices
// ============================================================================

/// Quiz subject offered on the subject keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Math,
    Science,
    English,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::Science, Subject::English];

    /// Case-insensitive exact match against the subject names.
    pub fn from_choice(input: &str) -> Option<Self> {
        let input = input.to_lowercase();
        Self::ALL.into_iter().find(|subject| subject.as_str() == input)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Science => "science",
            Subject::English => "english",
        }
    }

    /// Keyboard label
    pub fn label(self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::Science => "Science",
            Subject::English => "English",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quiz difficulty offered on the difficulty keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Case-insensitive exact match against the difficulty names.
    pub fn from_choice(input: &str) -> Option<Self> {
        let input = input.to_lowercase();
        Self::ALL.into_iter().find(|difficulty| difficulty.as_str() == input)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Keyboard label
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Dialogue State
// ============================================================================

/// Per-user dialogue state
///
/// Each variant carries exactly the fields that are valid while in it, so a
/// difficulty can only exist alongside a subject, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogueState {
    /// No dialogue in progress
    #[default]
    Idle,

    /// `/quiz` received, waiting for a subject
    ChoosingSubject,

    /// Subject chosen, waiting for a difficulty
    ChoosingDifficulty { subject: Subject },

    /// Question requested or shown, waiting for the user's answer
    AnsweringQuestion {
        subject: Subject,
        difficulty: Difficulty,
        /// Text shown to the user; `None` until generation completes
        question: Option<String>,
        /// Expected answer, when one could be separated from the question
        pending_answer: Option<String>,
    },

    /// `/doubt` received, waiting for the question text
    AskingDoubt,
}

impl DialogueState {
    /// Whether a `/quiz` or `/doubt` dialogue is in progress
    pub fn is_active(&self) -> bool {
        !matches!(self, DialogueState::Idle)
    }

    /// Stable name for logs
    pub fn name(&self) -> &'static str {
        match self {
            DialogueState::Idle => "idle",
            DialogueState::ChoosingSubject => "choosing_subject",
            DialogueState::ChoosingDifficulty { .. } => "choosing_difficulty",
            DialogueState::AnsweringQuestion { .. } => "answering_question",
            DialogueState::AskingDoubt => "asking_doubt",
        }
    }
}
