//! Reminder sweep.
//!
//! Once a minute: select every reminder due at `now`, try to deliver each one,
//! then delete every due row. Delivery is at-most-once; a failed send is
//! logged and the reminder is dropped with the rest.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::Notifier;
use crate::database::ReminderRepository;

/// Sweep period.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Outcome of one sweep tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub due: usize,
    pub delivered: usize,
    pub failed: usize,
    pub deleted: u64,
}

/// Periodic task that fires due reminders.
pub struct ReminderSweep<N> {
    reminders: ReminderRepository,
    notifier: N,
}

impl<N: Notifier> ReminderSweep<N> {
    pub fn new(reminders: ReminderRepository, notifier: N) -> Self {
        Self { reminders, notifier }
    }

    /// Run the sweep on its own task until `shutdown` flips or its sender drops.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("Reminder sweep started (every {}s)", SWEEP_INTERVAL.as_secs());

        let mut ticker = interval(SWEEP_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the first sweep waits one period.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick(Utc::now()).await;
                }
                _ = shutdown.changed() => break,
            }
        }

        info!("Reminder sweep stopped");
    }

    /// Fire and delete everything due at `now`.
    pub async fn tick(&self, now: DateTime<Utc>) -> SweepReport {
        let due = self.reminders.due(now).await;
        let mut report = SweepReport {
            due: due.len(),
            ..Default::default()
        };

        for reminder in &due {
            let text = reminder_text(&reminder.anime_name);
            match self.notifier.notify(reminder.user_id, &text).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!("Error sending reminder to user {}: {}", reminder.user_id, e);
                    report.failed += 1;
                }
            }
        }

        // Same cutoff as the select, so failed deliveries are dropped too.
        report.deleted = self.reminders.delete_due(now).await;

        if report.due > 0 {
            info!(
                due = report.due,
                delivered = report.delivered,
                failed = report.failed,
                deleted = report.deleted,
                "Reminder sweep finished"
            );
        } else {
            debug!("Reminder sweep: nothing due");
        }

        report
    }
}

/// Notification text for a fired reminder.
pub fn reminder_text(anime_name: &str) -> String {
    format!("Reminder: It's time to watch '{}'!", anime_name)
}
