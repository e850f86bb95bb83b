//! Reminder command handlers.
//!
//! /remind, /showreminders and /removereminder.

use chrono::{DateTime, Duration, Local, Utc};
use teloxide::prelude::*;
use tracing::info;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::database::Reminder;
use crate::utils::{parse_name, parse_remind_args, reply_text, sender_id, RemindArgsError};

pub const REMIND_USAGE: &str =
    "Please provide valid Name and Time. \n\nUsage: /remind <anime_name> <time_in_minutes>";
pub const REMIND_INVALID_TIME: &str = "Please provide a valid time in minutes.";
pub const REMOVE_REMINDER_USAGE: &str = "Usage: /removereminder <anime_name>";
pub const NO_REMINDERS: &str = "You have no reminders set.";

/// Handle /remind <anime_name...> <minutes>.
pub async fn remind_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    args: String,
) -> anyhow::Result<()> {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };

    let text = remind_reply(&state, user_id, &args, Utc::now()).await;
    reply_text(&bot, &msg, text, None).await
}

/// Validate arguments and store a reminder due `minutes` after `now`.
pub async fn remind_reply(state: &AppState, user_id: i64, args: &str, now: DateTime<Utc>) -> String {
    let (anime_name, minutes) = match parse_remind_args(args) {
        Ok(parsed) => parsed,
        Err(RemindArgsError::Usage) => return REMIND_USAGE.to_string(),
        Err(RemindArgsError::InvalidTime) => return REMIND_INVALID_TIME.to_string(),
    };

    let Some(remind_time) =
        Duration::try_minutes(minutes).and_then(|delay| now.checked_add_signed(delay))
    else {
        return REMIND_INVALID_TIME.to_string();
    };

    state.reminders.add(user_id, &anime_name, remind_time).await;
    info!("User {} set reminder '{}' in {} minutes", user_id, anime_name, minutes);

    format!("Reminder set for '{}' in {} minutes.", anime_name, minutes)
}

/// Handle /showreminders.
pub async fn show_reminders_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };

    let text = show_reminders_reply(&state, user_id).await;
    reply_text(&bot, &msg, text, None).await
}

pub async fn show_reminders_reply(state: &AppState, user_id: i64) -> String {
    let reminders = state.reminders.list(user_id).await;
    if reminders.is_empty() {
        return NO_REMINDERS.to_string();
    }

    let lines: Vec<String> = reminders.iter().map(format_reminder).collect();
    format!("Your reminders:\n{}", lines.join("\n"))
}

/// `<name> at <local time>`
pub fn format_reminder(reminder: &Reminder) -> String {
    format!(
        "{} at {}",
        reminder.anime_name,
        reminder.remind_time.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    )
}

/// Handle /removereminder <anime_name...>.
pub async fn remove_reminder_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    args: String,
) -> anyhow::Result<()> {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };

    let text = remove_reminder_reply(&state, user_id, &args).await;
    reply_text(&bot, &msg, text, None).await
}

/// Removes every pending reminder with that name, whatever its time.
pub async fn remove_reminder_reply(state: &AppState, user_id: i64, args: &str) -> String {
    let Some(anime_name) = parse_name(args) else {
        return REMOVE_REMINDER_USAGE.to_string();
    };

    let removed = state.reminders.remove(user_id, &anime_name).await;
    info!("User {} removed {} reminder(s) for '{}'", user_id, removed, anime_name);

    format!("Removed reminder for '{}'.", anime_name)
}
