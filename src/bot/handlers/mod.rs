pub mod callback;
pub mod message;

use std::sync::Arc;

use chrono::FixedOffset;
use teloxide::{
    dispatching::{dialogue, UpdateHandler},
    prelude::*,
};

use crate::database::connection::DatabaseManager;
use crate::scheduler::service::SchedulingService;
use crate::services::prayer_times::PrayerTimeSource;

/// Result type of the dispatcher endpoints; Telegram request errors are
/// boxed so the schema has a single error type.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone)]
pub struct BotHandler {
    pub db: DatabaseManager,
    pub service: Arc<SchedulingService>,
    pub timings: Arc<dyn PrayerTimeSource>,
    pub default_city: String,
    pub default_country: String,
    pub tz: FixedOffset,
}

impl BotHandler {
    pub fn new(
        db: DatabaseManager,
        service: Arc<SchedulingService>,
        timings: Arc<dyn PrayerTimeSource>,
        default_city: String,
        default_country: String,
        tz: FixedOffset,
    ) -> Self {
        Self {
            db,
            service,
            timings,
            default_city,
            default_country,
            tz,
        }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let ctx = self.clone();
        let ctx_callback = self.clone();

        dialogue::enter::<Update, teloxide::dispatching::dialogue::InMemStorage<()>, (), _>()
            .branch(
                Update::filter_message()
                    .filter_command::<crate::bot::commands::Command>()
                    .endpoint(move |bot, msg, cmd| {
                        let ctx = ctx.clone();
                        async move { message::command_handler(bot, msg, cmd, ctx).await }
                    }),
            )
            .branch(Update::filter_callback_query().endpoint(move |bot, q| {
                let ctx = ctx_callback.clone();
                async move { callback::callback_handler(bot, q, ctx).await }
            }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::database::settings_store::SqliteSettingsStore;
    use crate::scheduler::job_store::JobStore;
    use crate::services::notifier::TelegramNotifier;
    use crate::services::prayer_times::AladhanClient;
    use tempfile::TempDir;

    // The schema's endpoint closures and its declared error type must
    // agree; building it with the real collaborator types checks that.
    #[tokio::test]
    async fn test_schema_builds_with_real_collaborators() {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let db = DatabaseManager::new(&db_url).await.unwrap();
        db.run_migrations().await.unwrap();

        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let jobs = Arc::new(JobStore::new().await.unwrap());
        let settings = Arc::new(SqliteSettingsStore::new(
            db.clone(),
            "Singapore".to_string(),
            "Singapore".to_string(),
        ));
        let timings: Arc<dyn PrayerTimeSource> = Arc::new(AladhanClient::new(
            "http://localhost:1/timingsByCity".to_string(),
            3,
        ));
        let bot = Bot::new("123456:TEST");
        let notifier = Arc::new(TelegramNotifier::new(bot));

        let service = Arc::new(SchedulingService::new(
            jobs,
            settings,
            Arc::clone(&timings),
            notifier,
            tz,
        ));

        let handler = BotHandler::new(
            db,
            service,
            timings,
            "Singapore".to_string(),
            "Singapore".to_string(),
            tz,
        );

        let _schema = handler.schema();
    }
}
