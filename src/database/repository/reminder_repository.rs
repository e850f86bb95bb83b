//! Reminder repository.
//!
//! Reminders are keyed by `(user_id, anime_name, remind_time)`. Removal by the
//! user matches on name only, so it clears every pending time for that name.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::database::models::{Reminder, ReminderRow};
use crate::database::{fail_open, Database};

/// Repository for pending reminders.
#[derive(Clone)]
pub struct ReminderRepository {
    pool: SqlitePool,
}

impl ReminderRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.main().clone(),
        }
    }

    /// Add a reminder. Duplicate triples are silently ignored.
    ///
    /// Returns `true` if a new row was written.
    pub async fn add(&self, user_id: i64, anime_name: &str, remind_time: DateTime<Utc>) -> bool {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO reminders (user_id, anime_name, remind_time) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(anime_name)
        .bind(remind_time.timestamp_millis())
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() > 0);

        debug!("Add reminder '{}' for user {} at {}", anime_name, user_id, remind_time);
        fail_open("add_reminder", result)
    }

    /// Remove every reminder of `user_id` named `anime_name`, whatever its time.
    ///
    /// Returns the number of rows deleted.
    pub async fn remove(&self, user_id: i64, anime_name: &str) -> u64 {
        let result = sqlx::query("DELETE FROM reminders WHERE user_id = ? AND anime_name = ?")
            .bind(user_id)
            .bind(anime_name)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());

        fail_open("remove_reminder", result)
    }

    /// List a user's reminders in storage order.
    pub async fn list(&self, user_id: i64) -> Vec<Reminder> {
        let result = sqlx::query_as::<_, ReminderRow>(
            "SELECT user_id, anime_name, remind_time FROM reminders WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;

        into_reminders(fail_open("list_reminders", result))
    }

    /// All reminders whose time is at or before `now`.
    pub async fn due(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        let result = sqlx::query_as::<_, ReminderRow>(
            "SELECT user_id, anime_name, remind_time FROM reminders WHERE remind_time <= ?",
        )
        .bind(now.timestamp_millis())
        .fetch_all(&self.pool)
        .await;

        into_reminders(fail_open("due_reminders", result))
    }

    /// Delete all reminders whose time is at or before `now`.
    ///
    /// Returns the number of rows deleted.
    pub async fn delete_due(&self, now: DateTime<Utc>) -> u64 {
        let result = sqlx::query("DELETE FROM reminders WHERE remind_time <= ?")
            .bind(now.timestamp_millis())
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());

        fail_open("delete_due_reminders", result)
    }
}

fn into_reminders(rows: Vec<ReminderRow>) -> Vec<Reminder> {
    rows.into_iter()
        .filter_map(|row| {
            let (user_id, stamp) = (row.user_id, row.remind_time);
            let reminder = row.into_reminder();
            if reminder.is_none() {
                warn!("Skipping reminder of user {} with bad timestamp {}", user_id, stamp);
            }
            reminder
        })
        .collect()
}
