//! Plugin system for command handlers.
//!
//! Add new plugins by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Adding the handler to `command_handler()`

pub mod charts;
pub mod favorites;
pub mod help;
pub mod reminders;
pub mod start;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::dispatcher::{AppState, ThrottledBot};

/// All bot commands.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start(String),

    #[command(description = "Get help")]
    Help,

    // Reminders
    #[command(description = "Set a reminder: /remind <anime_name> <time_in_minutes>")]
    Remind(String),

    #[command(description = "Show your reminders")]
    ShowReminders,

    #[command(description = "Remove a reminder: /removereminder <anime_name>")]
    RemoveReminder(String),

    // Favorites
    #[command(description = "Show your favorite anime")]
    Favorites,

    #[command(description = "Add an anime to your favorites")]
    AddFavorite(String),

    #[command(description = "Remove an anime from your favorites")]
    RemoveFavorite(String),

    // Catalog charts
    #[command(description = "Get top anime list")]
    TopAnime,

    #[command(description = "Get trending anime")]
    TrendingAnime,

    #[command(description = "Get the most popular anime of the current season")]
    WeeklyTopAnime,
}

/// Build the combined command handler.
pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start(args)].endpoint(start::start_command))
        .branch(case![Command::Help].endpoint(help::help_command))
        // Reminders
        .branch(case![Command::Remind(args)].endpoint(reminders::remind_command))
        .branch(case![Command::ShowReminders].endpoint(reminders::show_reminders_command))
        .branch(case![Command::RemoveReminder(args)].endpoint(reminders::remove_reminder_command))
        // Favorites
        .branch(case![Command::Favorites].endpoint(favorites::favorites_command))
        .branch(case![Command::AddFavorite(args)].endpoint(favorites::add_favorite_command))
        .branch(case![Command::RemoveFavorite(args)].endpoint(favorites::remove_favorite_command))
        // Charts
        .branch(case![Command::TopAnime].endpoint(charts::top_anime_command))
        .branch(case![Command::TrendingAnime].endpoint(charts::trending_anime_command))
        .branch(case![Command::WeeklyTopAnime].endpoint(charts::weekly_top_anime_command))
}

/// Build the callback query handler.
pub fn callback_handler() -> UpdateHandler<anyhow::Error> {
    Update::filter_callback_query().branch(
        dptree::filter(|q: CallbackQuery| {
            q.data
                .as_deref()
                .is_some_and(|d| d.starts_with(favorites::FAVORITE_CALLBACK_PREFIX))
        })
        .endpoint(handle_favorite_callback),
    )
}

async fn handle_favorite_callback(
    bot: ThrottledBot,
    q: CallbackQuery,
    state: AppState,
) -> anyhow::Result<()> {
    favorites::favorite_callback(bot, q, state).await
}
