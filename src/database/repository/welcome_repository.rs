//! Welcome repository.
//!
//! Tracks the last calendar day each user was greeted, in its own database.
//! "Today" is the process-local date.

use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;
use tracing::debug;

use crate::database::models::WelcomeStatus;
use crate::database::{fail_open, Database};

/// Repository for daily welcome status.
#[derive(Clone)]
pub struct WelcomeRepository {
    pool: SqlitePool,
}

impl WelcomeRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.welcome().clone(),
        }
    }

    /// Whether the user was already greeted on the current local date.
    pub async fn has_been_welcomed_today(&self, user_id: i64) -> bool {
        self.was_welcomed_on(user_id, today()).await
    }

    /// Record that the user was greeted today.
    pub async fn record_welcome(&self, user_id: i64) {
        self.record_welcome_on(user_id, today()).await;
    }

    /// Whether the stored welcome date for the user equals `date`.
    pub async fn was_welcomed_on(&self, user_id: i64, date: NaiveDate) -> bool {
        let result = sqlx::query_as::<_, WelcomeStatus>(
            "SELECT user_id, last_welcome_date FROM welcome_status WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map(|status| status.is_some_and(|s| s.last_welcome_date == date));

        fail_open("has_been_welcomed_today", result)
    }

    /// Upsert `date` as the user's last welcome date.
    pub async fn record_welcome_on(&self, user_id: i64, date: NaiveDate) {
        let result = sqlx::query(
            "INSERT OR REPLACE INTO welcome_status (user_id, last_welcome_date) VALUES (?, ?)",
        )
        .bind(user_id)
        .bind(date)
        .execute(&self.pool)
        .await
        .map(|_| ());

        debug!("Recorded welcome for user {} on {}", user_id, date);
        fail_open("record_welcome", result)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_welcome_rolls_over_with_date() {
        let repo = WelcomeRepository::new(&Database::in_memory().await.unwrap());

        assert!(!repo.was_welcomed_on(5, day(1)).await);

        repo.record_welcome_on(5, day(1)).await;
        assert!(repo.was_welcomed_on(5, day(1)).await);

        // Next day the flag is clear again.
        assert!(!repo.was_welcomed_on(5, day(2)).await);

        repo.record_welcome_on(5, day(2)).await;
        assert!(repo.was_welcomed_on(5, day(2)).await);
        assert!(!repo.was_welcomed_on(5, day(1)).await);
    }

    #[tokio::test]
    async fn test_today_wrappers() {
        let repo = WelcomeRepository::new(&Database::in_memory().await.unwrap());

        assert!(!repo.has_been_welcomed_today(9).await);
        repo.record_welcome(9).await;
        assert!(repo.has_been_welcomed_today(9).await);
        assert!(!repo.has_been_welcomed_today(10).await);
    }

    #[tokio::test]
    async fn test_storage_error_reads_as_not_welcomed() {
        let db = Database::in_memory().await.unwrap();
        let repo = WelcomeRepository::new(&db);
        sqlx::query("DROP TABLE welcome_status")
            .execute(db.welcome())
            .await
            .unwrap();

        // Fail-open: no panic, no error, just `false`.
        repo.record_welcome(9).await;
        assert!(!repo.has_been_welcomed_today(9).await);
    }
}
