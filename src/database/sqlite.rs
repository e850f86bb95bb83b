//! SQLite database wrapper.
//!
//! The bot keeps two independent stores: the main one (reminders, users,
//! favorites) and a separate one for daily welcome tracking.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

const MAIN_SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS reminders (
        user_id INTEGER NOT NULL,
        anime_name TEXT NOT NULL,
        remind_time INTEGER NOT NULL,
        PRIMARY KEY (user_id, anime_name, remind_time)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY,
        last_interaction TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favorites (
        user_id INTEGER,
        anime_name TEXT,
        PRIMARY KEY (user_id, anime_name)
    )
    "#,
];

const WELCOME_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS welcome_status (
        user_id INTEGER PRIMARY KEY,
        last_welcome_date TEXT NOT NULL
    )
"#;

/// Database wrapper holding both SQLite pools.
#[derive(Debug, Clone)]
pub struct Database {
    main: SqlitePool,
    welcome: SqlitePool,
}

impl Database {
    /// Open (creating if needed) both databases and create missing tables.
    ///
    /// # Arguments
    /// * `main_url` - SQLite URL for reminders, users and favorites
    /// * `welcome_url` - SQLite URL for welcome tracking
    ///
    /// # Errors
    /// Returns error if either database cannot be opened or initialized.
    pub async fn connect(main_url: &str, welcome_url: &str) -> anyhow::Result<Self> {
        let main = open_pool(main_url, 5).await?;
        let welcome = open_pool(welcome_url, 2).await?;

        let db = Self { main, welcome };
        db.init_schema().await?;

        info!("Opened SQLite stores: {} and {}", main_url, welcome_url);
        Ok(db)
    }

    /// Open two private in-memory databases.
    ///
    /// Each pool is pinned to a single connection that never expires,
    /// since every new `:memory:` connection would be a fresh database.
    #[cfg(test)]
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = || {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        };

        let main = options().connect("sqlite::memory:").await?;
        let welcome = options().connect("sqlite::memory:").await?;

        let db = Self { main, welcome };
        db.init_schema().await?;
        Ok(db)
    }

    /// Create tables idempotently.
    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        for statement in MAIN_SCHEMA {
            sqlx::query(statement).execute(&self.main).await?;
        }
        sqlx::query(WELCOME_SCHEMA).execute(&self.welcome).await?;
        Ok(())
    }

    /// Pool for the reminders / users / favorites store.
    pub fn main(&self) -> &SqlitePool {
        &self.main
    }

    /// Pool for the welcome tracking store.
    pub fn welcome(&self) -> &SqlitePool {
        &self.welcome
    }
}

async fn open_pool(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        // Running the schema again must not fail on existing tables.
        db.init_schema().await.unwrap();

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(db.main())
                .await
                .unwrap();
        let names: Vec<_> = tables.into_iter().map(|(n,)| n).collect();
        assert_eq!(names, vec!["favorites", "reminders", "users"]);

        let welcome: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(db.welcome())
                .await
                .unwrap();
        assert_eq!(welcome, vec![("welcome_status".to_string(),)]);
    }
}
