//! Outbound notification delivery.

use std::future::Future;

use teloxide::prelude::*;

use crate::bot::dispatcher::ThrottledBot;

/// Something that can push a text message to a user's private chat.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, user_id: i64, text: &str) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl Notifier for ThrottledBot {
    async fn notify(&self, user_id: i64, text: &str) -> anyhow::Result<()> {
        // A user's private chat shares its id with the user.
        self.send_message(ChatId(user_id), text.to_string()).await?;
        Ok(())
    }
}
