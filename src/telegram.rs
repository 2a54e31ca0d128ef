//! Telegram transport
//!
//! Polls for updates, feeds text messages to the dialogue runtime and
//! renders replies (with choice keyboards) back to the chat.

use crate::runtime::{Chat, Messenger, ProductionRuntime, SessionKey, UserId};
use crate::state_machine::{Command, Keyboard, Reply};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, ChatId, KeyboardButton, KeyboardMarkup};

/// Telegram's per-message limit, in UTF-16 code units
pub const MAX_MESSAGE_UNITS: usize = 4096;

/// Adapter to use a teloxide `Bot` as Messenger
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, chat: Chat, reply: &Reply) -> Result<(), String> {
        let chunks = split_message(&reply.text, MAX_MESSAGE_UNITS);
        let last = chunks.len().saturating_sub(1);

        for (index, chunk) in chunks.into_iter().enumerate() {
            let request = self.bot.send_message(ChatId(chat.0), chunk);
            // The keyboard rides on the final chunk
            let sent = match &reply.keyboard {
                Some(keyboard) if index == last => {
                    request.reply_markup(render_keyboard(keyboard)).await
                }
                _ => request.await,
            };
            sent.map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

/// Run the polling loop until Ctrl-C
pub async fn run(bot: Bot, runtime: Arc<ProductionRuntime>) {
    register_commands(&bot).await;

    let handler = Update::filter_message().endpoint(on_message);

    tracing::info!("Polling for updates");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![runtime])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

#[allow(clippy::needless_pass_by_value)] // dptree hands endpoints owned values
async fn on_message(msg: Message, runtime: Arc<ProductionRuntime>) -> ResponseResult<()> {
    let chat = Chat(msg.chat.id.0);
    // Channel posts and anonymous admins carry no sender
    let Some(user) = msg
        .from
        .as_ref()
        .and_then(|sender| i64::try_from(sender.id.0).ok())
    else {
        tracing::debug!(chat_id = %chat, "Ignoring message without a sender");
        return Ok(());
    };
    let key = SessionKey::new(chat, UserId(user));

    let Some(text) = msg.text() else {
        tracing::debug!(session = %key, "Ignoring non-text message");
        return Ok(());
    };

    if let Err(e) = runtime.handle_message(key, text).await {
        tracing::error!(session = %key, error = %e, "Failed to handle message");
    }
    Ok(())
}

async fn register_commands(bot: &Bot) {
    let commands: Vec<BotCommand> = Command::MENU
        .iter()
        .map(|(name, description)| BotCommand::new(*name, *description))
        .collect();

    if let Err(e) = bot.set_my_commands(commands).await {
        tracing::warn!(error = %e, "Failed to register command menu");
    }
}

fn render_keyboard(keyboard: &Keyboard) -> KeyboardMarkup {
    let row: Vec<KeyboardButton> = keyboard
        .choices
        .iter()
        .map(|choice| KeyboardButton::new(choice.clone()))
        .collect();
    KeyboardMarkup::new(vec![row])
        .one_time_keyboard()
        .resize_keyboard()
}

/// Split `text` into chunks of at most `max_units` UTF-16 code units.
///
/// Chunks end on a line break when the over-long part contains one and
/// never split a character.
pub fn split_message(text: &str, max_units: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while let Some(limit) = overflow_offset(rest, max_units) {
        let (head, _) = rest.split_at(limit);
        let cut = match head.rfind('\n') {
            Some(newline) if newline > 0 => newline + 1,
            _ => limit,
        };
        let (chunk, tail) = rest.split_at(cut);
        chunks.push(chunk.to_string());
        rest = tail;
    }

    chunks.push(rest.to_string());
    chunks
}

/// Byte offset of the first char that pushes `text` past `max_units`
fn overflow_offset(text: &str, max_units: usize) -> Option<usize> {
    let mut units = 0;
    for (offset, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max_units {
            // A lone char wider than the limit still has to go somewhere
            return Some(if offset == 0 { c.len_utf8() } else { offset });
        }
    }
    None
}
