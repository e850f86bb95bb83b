//! Message dispatcher setup.
//!
//! Builds the dispatcher with all command and callback handlers.

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::catalog::CatalogClient;
use crate::database::{
    Database, FavoriteRepository, ReminderRepository, UserRepo, WelcomeRepository,
};
use crate::plugins;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
///
/// Everything in here is a cheap handle; cloning shares the same pools and
/// HTTP client.
#[derive(Clone)]
pub struct AppState {
    /// Known users.
    pub users: UserRepo,

    /// Pending reminders.
    pub reminders: ReminderRepository,

    /// Per-user favorites.
    pub favorites: FavoriteRepository,

    /// Daily welcome tracking.
    pub welcome: WelcomeRepository,

    /// AniList client.
    pub catalog: CatalogClient,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: &Database, catalog: CatalogClient) -> Self {
        Self {
            users: UserRepo::new(db),
            reminders: ReminderRepository::new(db),
            favorites: FavoriteRepository::new(db),
            welcome: WelcomeRepository::new(db),
            catalog,
        }
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    state: AppState,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    let message_handler = Update::filter_message().branch(plugins::command_handler());

    dptree::entry()
        .branch(message_handler)
        .branch(plugins::callback_handler())
}
