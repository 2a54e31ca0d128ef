//! Dialogue state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! `transition(state, event)` yields the next state plus effects, and the
//! runtime performs the effects.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, Keyboard, Reply};
pub use event::{Command, Event, GenerationPurpose};
pub use state::{DialogueState, Difficulty, Subject};
pub use transition::{points_message, transition, TransitionError, TransitionResult};
