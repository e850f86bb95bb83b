//! Background jobs.
//!
//! - `sweep` - fires due reminders once a minute
//! - `notifier` - outbound delivery seam used by the sweep

mod notifier;
mod sweep;

pub use notifier::Notifier;
pub use sweep::ReminderSweep;
