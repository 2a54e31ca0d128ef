//! Dialogue runtime executor

use super::traits::{Messenger, PointsLedger, SessionStore};
use super::SessionKey;
use crate::generation::TextGenerator;
use crate::state_machine::{
    points_message, transition, DialogueState, Effect, Event, Reply, TransitionError,
};
use std::time::Instant;

/// Generic dialogue runtime that can work with any store, ledger,
/// generator and messenger implementations.
///
/// Holds no per-session state itself: every call loads its session, so
/// calls for different sessions run independently and a slow generation
/// for one user never blocks another.
pub struct DialogueRuntime<S, P, G, M>
where
    S: SessionStore,
    P: PointsLedger,
    G: TextGenerator,
    M: Messenger,
{
    sessions: S,
    points: P,
    generator: G,
    messenger: M,
}

impl<S, P, G, M> DialogueRuntime<S, P, G, M>
where
    S: SessionStore,
    P: PointsLedger,
    G: TextGenerator,
    M: Messenger,
{
    pub fn new(sessions: S, points: P, generator: G, messenger: M) -> Self {
        Self {
            sessions,
            points,
            generator,
            messenger,
        }
    }

    /// Handle one inbound text message sent by `key.user` in `key.chat`
    pub async fn handle_message(&self, key: SessionKey, text: &str) -> Result<(), String> {
        self.process_event(key, Event::from_message(text)).await
    }

    async fn process_event(&self, key: SessionKey, event: Event) -> Result<(), String> {
        let mut state = self.sessions.load(key).await?;

        // Effects may generate follow-up events (generation results)
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            // Pure state transition
            let result = match transition(&state, current_event) {
                Ok(r) => r,
                Err(e @ TransitionError::ConversationActive) => {
                    tracing::debug!(session = %key, state = state.name(), "Entry command while dialogue active");
                    self.messenger
                        .send(key.chat, &Reply::text(e.to_string()))
                        .await?;
                    return Ok(());
                }
                Err(e) => return Err(e.to_string()),
            };

            if result.new_state != state {
                tracing::info!(
                    session = %key,
                    from = state.name(),
                    to = result.new_state.name(),
                    "Dialogue transition"
                );
            }

            // Persist before acting so a failed send cannot replay an effect
            self.sessions.save(key, &result.new_state).await?;
            state = result.new_state;

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(key, effect).await? {
                    events_to_process.push(generated_event);
                }
            }
        }

        Ok(())
    }

    async fn execute_effect(&self, key: SessionKey, effect: Effect) -> Result<Option<Event>, String> {
        match effect {
            Effect::Reply(reply) => {
                self.messenger.send(key.chat, &reply).await?;
                Ok(None)
            }

            Effect::Generate { purpose, prompt } => {
                let start = Instant::now();
                let result = self.generator.generate(&prompt).await;
                tracing::info!(
                    session = %key,
                    purpose = purpose.as_str(),
                    model = %self.generator.model_id(),
                    succeeded = result.succeeded,
                    duration_ms = %start.elapsed().as_millis(),
                    "Generation finished"
                );
                Ok(Some(Event::GenerationComplete { purpose, result }))
            }

            Effect::AwardPoint => {
                let total = self.points.increment(key.user).await?;
                tracing::info!(user_id = %key.user, total, "Point awarded");
                Ok(None)
            }

            Effect::ReportPoints => {
                let total = self.points.get(key.user).await?;
                self.messenger
                    .send(key.chat, &Reply::text(points_message(total)))
                    .await?;
                Ok(None)
            }
        }
    }

    /// Current dialogue state of a session
    #[allow(dead_code)] // Used by tests
    pub async fn state_of(&self, key: SessionKey) -> Result<DialogueState, String> {
        self.sessions.load(key).await
    }
}
