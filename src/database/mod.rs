//! Database module exports.
//!
//! Every public repository operation is fail-open: storage errors are logged
//! and turned into an empty / `false` result instead of reaching the caller.

mod models;
mod repository;
mod sqlite;
mod users;

use tracing::error;

pub use models::*;
pub use repository::{FavoriteRepository, ReminderRepository, WelcomeRepository};
pub use sqlite::Database;
pub use users::UserRepo;

/// Log a storage failure and fall back to `T::default()`.
pub(crate) fn fail_open<T: Default>(operation: &'static str, result: Result<T, sqlx::Error>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!(operation, "SQLite error: {}", e);
            T::default()
        }
    }
}
