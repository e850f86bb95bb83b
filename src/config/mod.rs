//! Configuration module for the anime reminder bot.
//!
//! Loads configuration from environment variables.

use serde::Deserialize;
use std::env;
use thiserror::Error;

use crate::catalog::{MediaSeason, SeasonFilter};

/// Default AniList GraphQL endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://graphql.anilist.co";

/// Errors raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("WEBHOOK_URL must be set when BOT_MODE is webhook")]
    WebhookUrlMissing,

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Bot running mode
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BotMode {
    #[default]
    Polling,
    Webhook,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub bot_mode: BotMode,
    pub webhook_url: Option<String>,
    pub webhook_port: u16,
    pub webhook_secret: Option<String>,

    // SQLite
    pub database_url: String,
    pub welcome_database_url: String,

    // AniList
    pub catalog_url: String,

    /// Season filter for /weeklytopanime.
    /// `None` means "derive from today's date".
    pub season_override: Option<SeasonFilter>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns an error if `BOT_TOKEN` is unset or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bot_token = env::var("BOT_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("BOT_TOKEN"))?;

        let bot_mode = match env::var("BOT_MODE")
            .unwrap_or_else(|_| "polling".to_string())
            .to_lowercase()
            .as_str()
        {
            "webhook" => BotMode::Webhook,
            _ => BotMode::Polling,
        };

        let webhook_url = env::var("WEBHOOK_URL").ok();
        if bot_mode == BotMode::Webhook && webhook_url.is_none() {
            return Err(ConfigError::WebhookUrlMissing);
        }

        let webhook_port = match env::var("WEBHOOK_PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "WEBHOOK_PORT",
                value: raw.clone(),
            })?,
            Err(_) => 8443,
        };

        let season_override = parse_season_override(
            env::var("CATALOG_SEASON").ok(),
            env::var("CATALOG_SEASON_YEAR").ok(),
        )?;

        Ok(Self {
            bot_token,
            bot_mode,
            webhook_url,
            webhook_port,
            webhook_secret: env::var("WEBHOOK_SECRET").ok().filter(|s| !s.is_empty()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:favorites.db?mode=rwc".to_string()),
            welcome_database_url: env::var("WELCOME_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:welcome.db?mode=rwc".to_string()),
            catalog_url: env::var("CATALOG_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string()),
            season_override,
        })
    }
}

/// Both variables must be present for the override to apply.
fn parse_season_override(
    season: Option<String>,
    year: Option<String>,
) -> Result<Option<SeasonFilter>, ConfigError> {
    let (Some(season), Some(year)) = (season, year) else {
        return Ok(None);
    };

    let parsed_season = season.parse::<MediaSeason>().map_err(|_| ConfigError::Invalid {
        name: "CATALOG_SEASON",
        value: season.clone(),
    })?;
    let parsed_year = year.trim().parse::<i32>().map_err(|_| ConfigError::Invalid {
        name: "CATALOG_SEASON_YEAR",
        value: year.clone(),
    })?;

    Ok(Some(SeasonFilter {
        season: parsed_season,
        year: parsed_year,
    }))
}
