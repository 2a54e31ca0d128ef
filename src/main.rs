//! Quiz and doubt-clearing Telegram bot
//!
//! A per-user dialogue state machine that hands question generation and
//! detailed answers off to a generative-language API.

mod config;
mod generation;
mod runtime;
mod state_machine;
mod telegram;

use config::Config;
use generation::{GeminiClient, TextGenerator};
use runtime::{DialogueRuntime, InMemoryPointsLedger, InMemorySessionStore};
use std::sync::Arc;
use telegram::TelegramMessenger;
use teloxide::Bot;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quiz_doubt_bot=info,teloxide=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;
    tracing::info!(config = ?config, "Configuration loaded");

    // Initialize generation client
    let generator = GeminiClient::new(
        config.gemini_api_key.clone(),
        &config.gemini_model,
        &config.gemini_base_url,
    )?;
    tracing::info!(model = %generator.model_id(), "Generation client initialized");

    let bot = Bot::new(config.bot_token.clone());
    let runtime = Arc::new(DialogueRuntime::new(
        InMemorySessionStore::new(),
        InMemoryPointsLedger::new(),
        generator,
        TelegramMessenger::new(bot.clone()),
    ));

    telegram::run(bot, runtime).await;

    tracing::info!("Bot stopped");
    Ok(())
}
