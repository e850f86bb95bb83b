//! /help command plugin.

use teloxide::prelude::*;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::utils::reply_text;

pub const HELP_TEXT: &str = "Commands:\n\
/start - Start the bot\n\
/help - Get help\n\
/remind <anime_name> <time_in_minutes> - Set a reminder\n\
/showreminders - Show your reminders\n\
/removereminder <anime_name> - Remove a reminder\n\
/favorites - Show your favorite anime\n\
/addfavorite <anime_name> - Add an anime to your favorites\n\
/removefavorite <anime_name> - Remove an anime from your favorites\n\
/topanime - Get top anime list\n\
/trendinganime - Get trending anime\n\
/weeklytopanime - Get the most popular anime of the current season";

/// Handle /help command.
pub async fn help_command(bot: ThrottledBot, msg: Message, _state: AppState) -> anyhow::Result<()> {
    reply_text(&bot, &msg, HELP_TEXT, None).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_command() {
        for command in [
            "/start", "/help", "/remind", "/showreminders", "/removereminder", "/favorites",
            "/addfavorite", "/removefavorite", "/topanime", "/trendinganime", "/weeklytopanime",
        ] {
            assert!(HELP_TEXT.contains(&format!("{} ", command)), "{} missing", command);
        }
    }

    #[test]
    fn test_weekly_line_names_the_season() {
        let line = HELP_TEXT
            .lines()
            .find(|l| l.starts_with("/weeklytopanime"))
            .unwrap();
        assert!(line.contains("current season"));
    }
}
