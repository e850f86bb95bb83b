//! Daily welcome tracking model.

use chrono::NaiveDate;
use sqlx::FromRow;

/// Last day a user received the welcome message.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct WelcomeStatus {
    pub user_id: i64,
    pub last_welcome_date: NaiveDate,
}
