//! User repository.
//!
//! Users are recorded the first time they send /start and never deleted.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use super::{fail_open, Database};

/// Repository for known users.
#[derive(Clone)]
pub struct UserRepo {
    pool: SqlitePool,
}

impl UserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.main().clone(),
        }
    }

    /// Insert the user or refresh their last interaction time.
    pub async fn upsert(&self, user_id: i64, seen_at: DateTime<Utc>) {
        let result = sqlx::query(
            r#"
            INSERT INTO users (user_id, last_interaction) VALUES (?, ?)
            ON CONFLICT (user_id) DO UPDATE SET last_interaction = excluded.last_interaction
            "#,
        )
        .bind(user_id)
        .bind(seen_at)
        .execute(&self.pool)
        .await
        .map(|_| debug!("Upserted user {}", user_id));

        fail_open("upsert_user", result)
    }

    /// Last interaction time, if the user is known.
    pub async fn last_interaction(&self, user_id: i64) -> Option<DateTime<Utc>> {
        let result = sqlx::query_as::<_, (Option<DateTime<Utc>>,)>(
            "SELECT last_interaction FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.and_then(|(seen,)| seen));

        fail_open("last_interaction", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_upsert_refreshes_last_interaction() {
        let db = Database::in_memory().await.unwrap();
        let users = UserRepo::new(&db);
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap();

        assert_eq!(users.last_interaction(3).await, None);

        users.upsert(3, first).await;
        assert_eq!(users.last_interaction(3).await, Some(first));

        users.upsert(3, second).await;
        assert_eq!(users.last_interaction(3).await, Some(second));

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(db.main())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_failed_upsert_is_swallowed() {
        let db = Database::in_memory().await.unwrap();
        let users = UserRepo::new(&db);
        sqlx::query("DROP TABLE users")
            .execute(db.main())
            .await
            .unwrap();

        users.upsert(3, Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()).await;
        assert_eq!(users.last_interaction(3).await, None);
    }
}
