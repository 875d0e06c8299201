use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::info;

use crate::error::SchedulerError;

/// Delivers a rendered reminder to a user. Failures are reported to the
/// caller, which logs and swallows them; they never abort a batch.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, user_id: i64, text: &str) -> Result<(), SchedulerError>;
}

/// Sends reminders through the Telegram Bot API.
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl NotificationSink for TelegramNotifier {
    async fn send(&self, user_id: i64, text: &str) -> Result<(), SchedulerError> {
        self.bot
            .send_message(ChatId(user_id), text)
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(|e| SchedulerError::Delivery {
                user_id,
                source: Box::new(e),
            })?;

        info!("Delivered reminder to user {}", user_id);
        Ok(())
    }
}
