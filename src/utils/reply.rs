//! Reply helper utilities.
//!
//! Provides consistent reply behavior across all handlers.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, ReplyParameters};

use crate::bot::dispatcher::ThrottledBot;

use super::parser::truncate_lines;

/// Telegram's message length limit.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Telegram user id of the message sender, if any.
///
/// Channel posts and some service messages have no sender.
pub fn sender_id(msg: &Message) -> Option<i64> {
    msg.from.as_ref().map(|u| u.id.0 as i64)
}

/// Send `text` as a reply to the command message.
pub async fn reply_text(
    bot: &ThrottledBot,
    msg: &Message,
    text: impl Into<String>,
    keyboard: Option<InlineKeyboardMarkup>,
) -> anyhow::Result<()> {
    let text = truncate_lines(&text.into(), MAX_MESSAGE_CHARS);

    let request = bot
        .send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id));

    match keyboard {
        Some(keyboard) => request.reply_markup(keyboard).await?,
        None => request.await?,
    };

    Ok(())
}
