//! Favorites command handlers.
//!
//! /favorites, /addfavorite, /removefavorite, plus the "⭐" buttons attached
//! to catalog charts.

use teloxide::prelude::*;
use tracing::{debug, info};

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::utils::{parse_name, reply_text, sender_id};

pub const ADD_FAVORITE_USAGE: &str = "Usage: /addfavorite <anime_name>";
pub const REMOVE_FAVORITE_USAGE: &str = "Usage: /removefavorite <anime_name>";
pub const NO_FAVORITES: &str = "You have no favorites yet.";
pub const FETCH_DETAILS_FAILED: &str = "Failed to fetch anime details.";

/// Callback data prefix: `fav:<anilist id>`.
pub const FAVORITE_CALLBACK_PREFIX: &str = "fav:";

/// Handle /favorites.
pub async fn favorites_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };

    let text = favorites_reply(&state, user_id).await;
    reply_text(&bot, &msg, text, None).await
}

pub async fn favorites_reply(state: &AppState, user_id: i64) -> String {
    let favorites = state.favorites.list(user_id).await;
    if favorites.is_empty() {
        return NO_FAVORITES.to_string();
    }

    let lines: Vec<String> = favorites.iter().map(|f| format!("- {}", f)).collect();
    format!("Your favorites:\n{}", lines.join("\n"))
}

/// Handle /addfavorite <anime_name...>.
pub async fn add_favorite_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    args: String,
) -> anyhow::Result<()> {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };

    let text = add_favorite_reply(&state, user_id, &args).await;
    reply_text(&bot, &msg, text, None).await
}

pub async fn add_favorite_reply(state: &AppState, user_id: i64, args: &str) -> String {
    let Some(anime_name) = parse_name(args) else {
        return ADD_FAVORITE_USAGE.to_string();
    };

    state.favorites.add(user_id, &anime_name, None).await;
    format!("Added '{}' to your favorites.", anime_name)
}

/// Handle /removefavorite <anime_name...>.
pub async fn remove_favorite_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    args: String,
) -> anyhow::Result<()> {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };

    let text = remove_favorite_reply(&state, user_id, &args).await;
    reply_text(&bot, &msg, text, None).await
}

/// Replies with success even if nothing matched.
pub async fn remove_favorite_reply(state: &AppState, user_id: i64, args: &str) -> String {
    let Some(anime_name) = parse_name(args) else {
        return REMOVE_FAVORITE_USAGE.to_string();
    };

    let removed = state.favorites.remove(user_id, &anime_name, None).await;
    debug!("User {} remove favorite '{}': {}", user_id, anime_name, removed);

    format!("Removed '{}' from your favorites.", anime_name)
}

/// Handle a `fav:<id>` button press.
pub async fn favorite_callback(
    bot: ThrottledBot,
    q: CallbackQuery,
    state: AppState,
) -> anyhow::Result<()> {
    let user_id = q.from.id.0 as i64;
    let data = q.data.as_deref().unwrap_or_default();

    let text = favorite_callback_reply(&state, user_id, data).await;

    bot.answer_callback_query(q.id).text(text).await?;
    Ok(())
}

/// Look the anime up and store it under its English title when it has one.
pub async fn favorite_callback_reply(state: &AppState, user_id: i64, data: &str) -> String {
    let Some(media_id) = data
        .strip_prefix(FAVORITE_CALLBACK_PREFIX)
        .and_then(|id| id.parse::<i64>().ok())
    else {
        return FETCH_DETAILS_FAILED.to_string();
    };

    let Some(media) = state.catalog.media_by_id(media_id).await else {
        return FETCH_DETAILS_FAILED.to_string();
    };

    state
        .favorites
        .add(user_id, &media.title.romaji, media.english_title())
        .await;
    info!("User {} favorited media {}", user_id, media_id);

    format!("Added '{}' to your favorites.", media.display_title())
}
