//! Favorites repository.
//!
//! A favorite is just a `(user_id, title)` pair. When a preferred title is
//! supplied (e.g. the English title from the catalog) it is what gets stored
//! and matched, not the name the user typed.

use sqlx::SqlitePool;
use tracing::debug;

use crate::database::{fail_open, Database};

/// Repository for per-user favorites.
#[derive(Clone)]
pub struct FavoriteRepository {
    pool: SqlitePool,
}

impl FavoriteRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.main().clone(),
        }
    }

    /// Add a favorite (insert-or-ignore).
    ///
    /// Returns `true` if a new row was written.
    pub async fn add(&self, user_id: i64, anime_name: &str, preferred_title: Option<&str>) -> bool {
        let title = stored_title(anime_name, preferred_title);

        let result = sqlx::query("INSERT OR IGNORE INTO favorites (user_id, anime_name) VALUES (?, ?)")
            .bind(user_id)
            .bind(title)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);

        debug!("Add favorite '{}' for user {}", title, user_id);
        fail_open("add_favorite", result)
    }

    /// Remove a favorite by preferred title if given, else by name.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn remove(&self, user_id: i64, anime_name: &str, preferred_title: Option<&str>) -> bool {
        let title = stored_title(anime_name, preferred_title);

        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND anime_name = ?")
            .bind(user_id)
            .bind(title)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);

        fail_open("remove_favorite", result)
    }

    /// List a user's favorite titles, skipping NULL rows.
    pub async fn list(&self, user_id: i64) -> Vec<String> {
        let result = sqlx::query_as::<_, (Option<String>,)>(
            "SELECT anime_name FROM favorites WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;

        fail_open("list_favorites", result)
            .into_iter()
            .filter_map(|(name,)| name)
            .collect()
    }
}

/// Empty preferred titles count as absent.
fn stored_title<'a>(anime_name: &'a str, preferred_title: Option<&'a str>) -> &'a str {
    preferred_title
        .filter(|t| !t.is_empty())
        .unwrap_or(anime_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> (Database, FavoriteRepository) {
        let db = Database::in_memory().await.unwrap();
        let repo = FavoriteRepository::new(&db);
        (db, repo)
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let (_db, repo) = setup().await;

        assert!(repo.add(7, "Naruto", None).await);
        assert_eq!(repo.list(7).await, vec!["Naruto".to_string()]);

        // Re-adding does not change the cardinality.
        assert!(!repo.add(7, "Naruto", None).await);
        assert_eq!(repo.list(7).await.len(), 1);
    }

    #[tokio::test]
    async fn test_preferred_title_is_stored() {
        let (_db, repo) = setup().await;

        repo.add(7, "Shingeki no Kyojin", Some("Attack on Titan")).await;
        assert_eq!(repo.list(7).await, vec!["Attack on Titan".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_title_mismatch_deletes_nothing() {
        let (_db, repo) = setup().await;
        repo.add(7, "Shingeki no Kyojin", Some("Attack on Titan")).await;

        // The typed name was never stored.
        assert!(!repo.remove(7, "Shingeki no Kyojin", None).await);
        assert_eq!(repo.list(7).await.len(), 1);

        assert!(repo.remove(7, "Shingeki no Kyojin", Some("Attack on Titan")).await);
        assert!(repo.list(7).await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_is_scoped_to_user() {
        let (_db, repo) = setup().await;
        repo.add(1, "Naruto", None).await;
        repo.add(2, "Naruto", None).await;

        assert!(repo.remove(1, "Naruto", None).await);
        assert!(repo.list(1).await.is_empty());
        assert_eq!(repo.list(2).await, vec!["Naruto".to_string()]);
    }

    #[tokio::test]
    async fn test_list_skips_null_titles() {
        let (db, repo) = setup().await;
        sqlx::query("INSERT INTO favorites (user_id, anime_name) VALUES (7, NULL)")
            .execute(db.main())
            .await
            .unwrap();
        repo.add(7, "Naruto", None).await;

        assert_eq!(repo.list(7).await, vec!["Naruto".to_string()]);
    }

    #[tokio::test]
    async fn test_storage_error_reads_as_empty() {
        let (db, repo) = setup().await;
        sqlx::query("DROP TABLE favorites")
            .execute(db.main())
            .await
            .unwrap();

        assert!(!repo.add(7, "Naruto", None).await);
        assert!(!repo.remove(7, "Naruto", None).await);
        assert!(repo.list(7).await.is_empty());
    }
}
