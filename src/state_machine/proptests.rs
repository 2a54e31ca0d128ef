//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::transition::{CANCELLED, CORRECT, INVALID_DIFFICULTY, INVALID_SUBJECT};
use super::*;
use crate::generation::GenerationResult;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_subject() -> impl Strategy<Value = Subject> {
    prop_oneof![
        Just(Subject::Math),
        Just(Subject::Science),
        Just(Subject::English),
    ]
}

fn arb_difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn arb_answering_state() -> impl Strategy<Value = DialogueState> {
    (
        arb_subject(),
        arb_difficulty(),
        proptest::option::of("[a-zA-Z ?]{1,40}"),
        proptest::option::of("[a-z ]{1,12}"),
    )
        .prop_map(|(subject, difficulty, question, pending_answer)| {
            DialogueState::AnsweringQuestion {
                subject,
                difficulty,
                question,
                pending_answer,
            }
        })
}

fn arb_active_state() -> impl Strategy<Value = DialogueState> {
    prop_oneof![
        Just(DialogueState::ChoosingSubject),
        arb_subject().prop_map(|subject| DialogueState::ChoosingDifficulty { subject }),
        arb_answering_state(),
        Just(DialogueState::AskingDoubt),
    ]
}

fn arb_state() -> impl Strategy<Value = DialogueState> {
    prop_oneof![Just(DialogueState::Idle), arb_active_state()]
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Start),
        Just(Command::Quiz),
        Just(Command::Doubt),
        Just(Command::Cancel),
        Just(Command::Points),
        "[a-z]{1,8}".prop_map(Command::Unknown),
    ]
}

/// Free text biased towards the words the dialogue reacts to
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_subject().prop_map(|s| s.label().to_string()),
        arb_difficulty().prop_map(|d| d.as_str().to_uppercase()),
        "[a-zA-Z0-9 ?]{0,30}",
    ]
}

fn arb_generation_result() -> impl Strategy<Value = GenerationResult> {
    prop_oneof![
        "[a-zA-Z0-9 ?]{1,40}".prop_map(GenerationResult::success),
        Just(GenerationResult::fallback()),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_command().prop_map(Event::Command),
        arb_text().prop_map(Event::Text),
        (
            prop_oneof![
                Just(GenerationPurpose::QuizQuestion),
                Just(GenerationPurpose::DoubtAnswer)
            ],
            arb_generation_result()
        )
            .prop_map(|(purpose, result)| Event::GenerationComplete { purpose, result }),
    ]
}

// ============================================================================
// Helpers
// ============================================================================

/// Edges of the dialogue graph; anything else is a skipped step.
fn is_allowed_edge(from: &DialogueState, to: &DialogueState) -> bool {
    use DialogueState as S;
    match (from, to) {
        (_, S::Idle)
        | (S::Idle | S::ChoosingSubject, S::ChoosingSubject)
        | (S::Idle | S::AskingDoubt, S::AskingDoubt) => true,
        (S::ChoosingSubject, S::ChoosingDifficulty { .. }) => true,
        (S::ChoosingDifficulty { subject: a }, S::ChoosingDifficulty { subject: b }) => a == b,
        (
            S::ChoosingDifficulty { subject: a },
            S::AnsweringQuestion { subject: b, .. },
        ) => a == b,
        (
            S::AnsweringQuestion {
                subject: s1,
                difficulty: d1,
                ..
            },
            S::AnsweringQuestion {
                subject: s2,
                difficulty: d2,
                ..
            },
        ) => s1 == s2 && d1 == d2,
        _ => false,
    }
}

fn reply_texts(effects: &[Effect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Reply(reply) => Some(reply.text.as_str()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_transitions_follow_dialogue_graph(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, event) {
            prop_assert!(
                is_allowed_edge(&state, &result.new_state),
                "{} -> {} is not an allowed edge",
                state.name(),
                result.new_state.name()
            );
        }
    }

    #[test]
    fn prop_event_sequences_never_skip_steps(events in proptest::collection::vec(arb_event(), 1..20)) {
        let mut state = DialogueState::Idle;
        for event in events {
            if let Ok(result) = transition(&state, event) {
                prop_assert!(is_allowed_edge(&state, &result.new_state));
                state = result.new_state;
            }
        }
    }

    #[test]
    fn prop_invalid_subject_never_advances(
        text in "[a-zA-Z ]{0,12}".prop_filter("must not be a subject", |s| Subject::from_choice(s).is_none())
    ) {
        let result = transition(&DialogueState::ChoosingSubject, Event::Text(text)).unwrap();
        prop_assert_eq!(result.new_state, DialogueState::ChoosingSubject);
        prop_assert_eq!(reply_texts(&result.effects), vec![INVALID_SUBJECT]);
    }

    #[test]
    fn prop_invalid_difficulty_never_advances(
        subject in arb_subject(),
        text in "[a-zA-Z ]{0,12}".prop_filter("must not be a difficulty", |s| Difficulty::from_choice(s).is_none())
    ) {
        let state = DialogueState::ChoosingDifficulty { subject };
        let result = transition(&state, Event::Text(text)).unwrap();
        prop_assert_eq!(result.new_state, state);
        prop_assert_eq!(reply_texts(&result.effects), vec![INVALID_DIFFICULTY]);
    }

    #[test]
    fn prop_cancel_from_any_active_state_returns_to_idle(state in arb_active_state()) {
        let result = transition(&state, Event::Command(Command::Cancel)).unwrap();
        prop_assert_eq!(result.new_state, DialogueState::Idle);
        prop_assert_eq!(reply_texts(&result.effects), vec![CANCELLED]);
    }

    #[test]
    fn prop_answer_match_ignores_case_and_outer_whitespace(
        answer in "[a-z]{1,8}( [a-z]{1,8})?",
        left in " {0,3}",
        right in " {0,3}",
    ) {
        let state = DialogueState::AnsweringQuestion {
            subject: Subject::English,
            difficulty: Difficulty::Medium,
            question: Some("Fill in the blank".to_string()),
            pending_answer: Some(answer.clone()),
        };
        let given = format!("{left}{}{right}", answer.to_uppercase());
        let result = transition(&state, Event::Text(given)).unwrap();
        prop_assert_eq!(result.new_state, DialogueState::Idle);
        prop_assert_eq!(result.effects, vec![Effect::AwardPoint, Effect::reply(CORRECT)]);
    }

    #[test]
    fn prop_at_most_one_point_per_event(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, event) {
            let awarded = result.effects.iter().filter(|e| **e == Effect::AwardPoint).count();
            prop_assert!(awarded <= 1);
            if awarded == 1 {
                prop_assert!(
                    matches!(state, DialogueState::AnsweringQuestion { .. }),
                    "point awarded outside AnsweringQuestion"
                );
                prop_assert_eq!(result.new_state, DialogueState::Idle);
            }
        }
    }
}
