//! Repository module - data access layer.

mod favorite_repository;
mod reminder_repository;
mod welcome_repository;

pub use favorite_repository::FavoriteRepository;
pub use reminder_repository::ReminderRepository;
pub use welcome_repository::WelcomeRepository;
