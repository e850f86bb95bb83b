//! Catalog chart commands.
//!
//! /topanime, /trendinganime and /weeklytopanime pass AniList results straight
//! through. Each entry also gets a "⭐" button that adds it to favorites.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::catalog::Media;
use crate::utils::reply_text;

use super::favorites::FAVORITE_CALLBACK_PREFIX;

/// Only the first entries get a favorite button.
const MAX_FAVORITE_BUTTONS: usize = 10;
const BUTTONS_PER_ROW: usize = 2;
const MAX_BUTTON_TITLE_CHARS: usize = 30;

pub const NO_ANIME_FOUND: &str = "No anime found.";

/// Which chart a command asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Top,
    Trending,
    WeeklyTop,
}

impl ChartKind {
    pub fn header(self) -> &'static str {
        match self {
            Self::Top => "Top Anime:",
            Self::Trending => "Trending Anime:",
            Self::WeeklyTop => "Weekly Top Anime:",
        }
    }

    pub fn failure_text(self) -> &'static str {
        match self {
            Self::Top => "Failed to fetch top anime list.",
            Self::Trending => "Failed to fetch trending anime.",
            Self::WeeklyTop => "Failed to fetch weekly top anime.",
        }
    }

    async fn fetch(self, state: &AppState) -> Option<Vec<Media>> {
        match self {
            Self::Top => state.catalog.top_anime().await,
            Self::Trending => state.catalog.trending_anime().await,
            Self::WeeklyTop => state.catalog.weekly_top_anime().await,
        }
    }
}

/// Text plus optional favorite buttons.
#[derive(Debug, Clone)]
pub struct ChartReply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

/// Format a chart result. `None` (catalog unavailable) yields the failure text.
pub fn chart_reply(kind: ChartKind, media: Option<Vec<Media>>) -> ChartReply {
    let Some(media) = media else {
        return ChartReply {
            text: kind.failure_text().to_string(),
            keyboard: None,
        };
    };

    if media.is_empty() {
        return ChartReply {
            text: format!("{}\n{}", kind.header(), NO_ANIME_FOUND),
            keyboard: None,
        };
    }

    let lines: Vec<String> = media.iter().map(format_media).collect();

    ChartReply {
        text: format!("{}\n{}", kind.header(), lines.join("\n")),
        keyboard: Some(favorite_keyboard(&media)),
    }
}

/// `<romaji> (<english or "No English Title">)`
pub fn format_media(media: &Media) -> String {
    format!(
        "{} ({})",
        media.title.romaji,
        media.english_title().unwrap_or("No English Title")
    )
}

fn favorite_keyboard(media: &[Media]) -> InlineKeyboardMarkup {
    let buttons: Vec<InlineKeyboardButton> = media
        .iter()
        .take(MAX_FAVORITE_BUTTONS)
        .map(|m| {
            InlineKeyboardButton::callback(
                format!("⭐ {}", shorten(m.display_title(), MAX_BUTTON_TITLE_CHARS)),
                format!("{}{}", FAVORITE_CALLBACK_PREFIX, m.id),
            )
        })
        .collect();

    InlineKeyboardMarkup::new(buttons.chunks(BUTTONS_PER_ROW).map(|row| row.to_vec()))
}

fn shorten(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let cut: String = title.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut)
}

async fn send_chart(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    kind: ChartKind,
) -> anyhow::Result<()> {
    let reply = chart_reply(kind, kind.fetch(&state).await);
    reply_text(&bot, &msg, reply.text, reply.keyboard).await
}

/// Handle /topanime.
pub async fn top_anime_command(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    send_chart(bot, msg, state, ChartKind::Top).await
}

/// Handle /trendinganime.
pub async fn trending_anime_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    send_chart(bot, msg, state, ChartKind::Trending).await
}

/// Handle /weeklytopanime.
pub async fn weekly_top_anime_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    send_chart(bot, msg, state, ChartKind::WeeklyTop).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    use crate::catalog::{serve_fixture, CatalogClient, PAGE_BODY};
    use crate::database::Database;

    async fn state_with(catalog_url: String) -> AppState {
        let db = Database::in_memory().await.unwrap();
        AppState::new(&db, CatalogClient::new(catalog_url))
    }

    #[tokio::test]
    async fn test_chart_reply_formats_entries() {
        let state = state_with(serve_fixture(200, PAGE_BODY).await).await;

        let reply = chart_reply(ChartKind::Top, ChartKind::Top.fetch(&state).await);
        assert_eq!(
            reply.text,
            "Top Anime:\n\
             Sousou no Frieren (Frieren: Beyond Journey's End)\n\
             Gintama. (No English Title)\n\
             Steins;Gate (No English Title)"
        );

        let keyboard = reply.keyboard.unwrap();
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0].len(), 2);
        match &keyboard.inline_keyboard[0][0].kind {
            InlineKeyboardButtonKind::CallbackData(data) => assert_eq!(data, "fav:154587"),
            other => panic!("unexpected button kind {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_catalog_unavailable_replies_failure() {
        let state = state_with(serve_fixture(500, "down").await).await;

        for kind in [ChartKind::Top, ChartKind::Trending, ChartKind::WeeklyTop] {
            let reply = chart_reply(kind, kind.fetch(&state).await);
            assert_eq!(reply.text, kind.failure_text());
            assert!(reply.keyboard.is_none());
        }
    }

    #[test]
    fn test_empty_chart_is_not_a_failure() {
        let reply = chart_reply(ChartKind::Trending, Some(vec![]));
        assert_eq!(reply.text, "Trending Anime:\nNo anime found.");
        assert!(reply.keyboard.is_none());
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("Naruto", 30), "Naruto");
        assert_eq!(shorten("abcdef", 4), "abc…");
    }
}
