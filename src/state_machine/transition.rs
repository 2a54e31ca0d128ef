//! Pure state transition function
//!
//! Given the same state and event, `transition` always produces the same
//! next state and effects. All I/O happens in the runtime.

use super::event::{Command, GenerationPurpose};
use super::state::{Difficulty, Subject};
use super::{DialogueState, Effect, Event, Keyboard};
use crate::generation::prompts;
use thiserror::Error;

pub const WELCOME: &str =
    "Welcome to the Quiz and Doubt Clearing Bot! Type /quiz to start a quiz or /doubt to ask a question.";
pub const CHOOSE_SUBJECT: &str = "Choose a subject:";
pub const ENTER_DOUBT: &str = "Please enter your doubt or question:";
pub const INVALID_SUBJECT: &str = "Please choose a valid subject: math, science, or english.";
pub const CHOOSE_DIFFICULTY: &str = "Choose difficulty level:";
pub const INVALID_DIFFICULTY: &str =
    "Please choose a valid difficulty level: easy, medium, or hard.";
pub const CORRECT: &str = "Correct! Type /quiz to play again.";
pub const WRONG: &str = "Wrong! Type /quiz to play again.";
pub const CANCELLED: &str =
    "Action cancelled. Type /quiz to start a quiz or /doubt to ask a question.";

/// Reply text for `/points`
pub fn points_message(points: u64) -> String {
    if points == 1 {
        "You have 1 point.".to_string()
    } else {
        format!("You have {points} points.")
    }
}

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: DialogueState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: DialogueState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// Display text is shown to the user
    #[error("You're in the middle of a quiz or question. Finish it or send /cancel to start over.")]
    ConversationActive,
    #[error("Unexpected {event} in state {state}")]
    UnexpectedEvent {
        state: &'static str,
        event: &'static str,
    },
}

/// Pure transition function
pub fn transition(
    state: &DialogueState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Commands valid in every state
        // ============================================================
        (_, Event::Command(Command::Start)) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::reply(WELCOME)))
        }

        (_, Event::Command(Command::Points)) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::ReportPoints))
        }

        (_, Event::Command(Command::Unknown(_))) => Ok(TransitionResult::new(state.clone())),

        // ============================================================
        // Entry points
        // ============================================================
        (DialogueState::Idle, Event::Command(Command::Quiz)) => {
            Ok(TransitionResult::new(DialogueState::ChoosingSubject).with_effect(
                Effect::reply_with_keyboard(CHOOSE_SUBJECT, Keyboard::subjects()),
            ))
        }

        (DialogueState::Idle, Event::Command(Command::Doubt)) => Ok(TransitionResult::new(
            DialogueState::AskingDoubt,
        )
        .with_effect(Effect::reply(ENTER_DOUBT))),

        (_, Event::Command(Command::Quiz | Command::Doubt)) => {
            Err(TransitionError::ConversationActive)
        }

        // ============================================================
        // Cancellation
        // ============================================================
        // Nothing in progress: no acknowledgement, chatter included
        (DialogueState::Idle, Event::Command(Command::Cancel) | Event::Text(_)) => {
            Ok(TransitionResult::new(DialogueState::Idle))
        }

        (_, Event::Command(Command::Cancel)) => {
            Ok(TransitionResult::new(DialogueState::Idle).with_effect(Effect::reply(CANCELLED)))
        }

        // ============================================================
        // Quiz flow
        // ============================================================
        (DialogueState::ChoosingSubject, Event::Text(text)) => match Subject::from_choice(&text) {
            Some(subject) => Ok(TransitionResult::new(DialogueState::ChoosingDifficulty {
                subject,
            })
            .with_effect(Effect::reply_with_keyboard(
                CHOOSE_DIFFICULTY,
                Keyboard::difficulties(),
            ))),
            None => Ok(TransitionResult::new(DialogueState::ChoosingSubject)
                .with_effect(Effect::reply(INVALID_SUBJECT))),
        },

        (DialogueState::ChoosingDifficulty { subject }, Event::Text(text)) => {
            match Difficulty::from_choice(&text) {
                Some(difficulty) => Ok(TransitionResult::new(DialogueState::AnsweringQuestion {
                    subject: *subject,
                    difficulty,
                    question: None,
                    pending_answer: None,
                })
                .with_effect(Effect::Generate {
                    purpose: GenerationPurpose::QuizQuestion,
                    prompt: prompts::quiz_question(subject.as_str(), difficulty.as_str()),
                })),
                None => Ok(TransitionResult::new(state.clone())
                    .with_effect(Effect::reply(INVALID_DIFFICULTY))),
            }
        }

        // The generated text is shown as-is, fallback included. No answer
        // is separated from it, so `pending_answer` stays unset.
        (
            DialogueState::AnsweringQuestion {
                subject,
                difficulty,
                question: None,
                pending_answer,
            },
            Event::GenerationComplete {
                purpose: GenerationPurpose::QuizQuestion,
                result,
            },
        ) => Ok(TransitionResult::new(DialogueState::AnsweringQuestion {
            subject: *subject,
            difficulty: *difficulty,
            question: Some(result.text.clone()),
            pending_answer: pending_answer.clone(),
        })
        .with_effect(Effect::reply(result.text))),

        (DialogueState::AnsweringQuestion { pending_answer, .. }, Event::Text(text)) => {
            if answers_match(&text, pending_answer.as_deref()) {
                Ok(TransitionResult::new(DialogueState::Idle)
                    .with_effect(Effect::AwardPoint)
                    .with_effect(Effect::reply(CORRECT)))
            } else {
                Ok(TransitionResult::new(DialogueState::Idle).with_effect(Effect::reply(WRONG)))
            }
        }

        // ============================================================
        // Doubt flow
        // ============================================================
        (DialogueState::AskingDoubt, Event::Text(text)) => {
            Ok(TransitionResult::new(DialogueState::Idle).with_effect(Effect::Generate {
                purpose: GenerationPurpose::DoubtAnswer,
                prompt: prompts::doubt_answer(&text),
            }))
        }

        (
            DialogueState::Idle,
            Event::GenerationComplete {
                purpose: GenerationPurpose::DoubtAnswer,
                result,
            },
        ) => Ok(TransitionResult::new(DialogueState::Idle).with_effect(Effect::reply(result.text))),

        (state, Event::GenerationComplete { purpose, .. }) => {
            Err(TransitionError::UnexpectedEvent {
                state: state.name(),
                event: purpose.as_str(),
            })
        }
    }
}

/// Trimmed, case-folded equality. A missing expected answer compares as "".
fn answers_match(given: &str, expected: Option<&str>) -> bool {
    normalize(given) == normalize(expected.unwrap_or_default())
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
