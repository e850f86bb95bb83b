//! /start command plugin.
//!
//! Greets a user at most once per calendar day.

use chrono::Utc;
use teloxide::prelude::*;
use tracing::info;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::utils::{reply_text, sender_id};

pub const WELCOME_TEXT: &str = "Welcome to the Anime Reminder Bot!";
pub const ALREADY_WELCOMED_TEXT: &str = "You have already been welcomed today.";

/// Handle the /start command. Deep-link payloads are ignored.
pub async fn start_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    _args: String,
) -> anyhow::Result<()> {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };

    let text = start_reply(&state, user_id).await;
    reply_text(&bot, &msg, text, None).await
}

/// Record the user and build the (once-a-day) greeting.
pub async fn start_reply(state: &AppState, user_id: i64) -> &'static str {
    if state.users.last_interaction(user_id).await.is_none() {
        info!("New user {}", user_id);
    }
    state.users.upsert(user_id, Utc::now()).await;

    if state.welcome.has_been_welcomed_today(user_id).await {
        return ALREADY_WELCOMED_TEXT;
    }

    state.welcome.record_welcome(user_id).await;
    WELCOME_TEXT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogClient;
    use crate::database::Database;

    #[tokio::test]
    async fn test_start_welcomes_once_per_day() {
        let db = Database::in_memory().await.unwrap();
        let state = AppState::new(&db, CatalogClient::new("http://127.0.0.1:9/"));

        assert_eq!(start_reply(&state, 11).await, WELCOME_TEXT);
        assert_eq!(start_reply(&state, 11).await, ALREADY_WELCOMED_TEXT);
        assert_eq!(start_reply(&state, 11).await, ALREADY_WELCOMED_TEXT);

        // Another user gets their own greeting.
        assert_eq!(start_reply(&state, 12).await, WELCOME_TEXT);

        assert!(state.users.last_interaction(11).await.is_some());
    }
}
