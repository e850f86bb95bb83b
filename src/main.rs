//! Animebot - Telegram bot for anime reminders and charts.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - SQLite stores (reminders/users/favorites + welcome tracking)
//! - `catalog` - AniList GraphQL client
//! - `bot` - Core bot functionality (with Throttle for API rate limiting)
//! - `plugins` - Command handlers
//! - `scheduler` - Reminder sweep
//! - `utils` - Utility functions

mod bot;
mod catalog;
mod config;
mod database;
mod plugins;
mod scheduler;
mod utils;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bot::AppState;
use catalog::CatalogClient;
use config::Config;
use database::{Database, ReminderRepository};
use plugins::Command;
use scheduler::ReminderSweep;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("animebot=info,teloxide=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting anime reminder bot...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");
    info!("Bot mode: {:?}", config.bot_mode);

    let db = Database::connect(&config.database_url, &config.welcome_database_url).await?;
    info!("Database ready");

    let catalog = CatalogClient::new(&config.catalog_url).with_season(config.season_override);
    info!("Catalog endpoint: {}", config.catalog_url);

    // Throttle respects Telegram's rate limits:
    // - 30 messages per second globally
    // - 1 message per second to the same chat
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register command list: {}", e);
    }

    // Reminder sweep runs beside the dispatcher until shutdown.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweep = ReminderSweep::new(ReminderRepository::new(&db), bot.clone()).spawn(shutdown_rx);

    let state = AppState::new(&db, catalog);
    let dispatcher = bot::build_dispatcher(bot.clone(), state);

    let result = bot::run(&config, bot, dispatcher).await;

    info!("Shutting down...");
    let _ = shutdown_tx.send(true);
    if let Err(e) = sweep.await {
        warn!("Reminder sweep task ended abnormally: {}", e);
    }

    result
}
