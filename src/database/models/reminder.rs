//! Reminder data model.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A pending reminder.
///
/// The triple `(user_id, anime_name, remind_time)` is the primary key, so a user
/// can hold several reminders for the same name only at distinct times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Telegram user ID (also the private chat to notify).
    pub user_id: i64,
    /// Free-text label chosen by the user.
    pub anime_name: String,
    /// When the reminder becomes due.
    pub remind_time: DateTime<Utc>,
}

/// Raw row as stored in SQLite (`remind_time` in unix milliseconds).
#[derive(Debug, FromRow)]
pub(crate) struct ReminderRow {
    pub user_id: i64,
    pub anime_name: String,
    pub remind_time: i64,
}

impl ReminderRow {
    /// Convert into the domain model.
    ///
    /// Returns `None` for timestamps chrono cannot represent.
    pub fn into_reminder(self) -> Option<Reminder> {
        Some(Reminder {
            user_id: self.user_id,
            anime_name: self.anime_name,
            remind_time: DateTime::from_timestamp_millis(self.remind_time)?,
        })
    }
}
