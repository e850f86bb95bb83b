//! Database model exports.

pub mod reminder;
pub mod welcome_status;

pub use reminder::Reminder;
pub(crate) use reminder::ReminderRow;
pub use welcome_status::WelcomeStatus;
