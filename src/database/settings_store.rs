use async_trait::async_trait;

use crate::database::connection::DatabaseManager;
use crate::database::models::UserSettings;
use crate::error::SchedulerError;
use crate::scheduler::service::SettingsStore;

/// SQLite-backed settings store. A user without a row reads back as the
/// all-disabled default at the configured default location.
pub struct SqliteSettingsStore {
    db: DatabaseManager,
    default_city: String,
    default_country: String,
}

impl SqliteSettingsStore {
    pub fn new(db: DatabaseManager, default_city: String, default_country: String) -> Self {
        Self {
            db,
            default_city,
            default_country,
        }
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn get(&self, user_id: i64) -> Result<UserSettings, SchedulerError> {
        match UserSettings::find_by_user(&self.db.pool, user_id).await {
            Ok(Some(settings)) => Ok(settings),
            Ok(None) => Ok(UserSettings::disabled(
                user_id,
                &self.default_city,
                &self.default_country,
            )),
            Err(e) => Err(SchedulerError::SettingsUnavailable(e)),
        }
    }

    async fn all_enabled(&self) -> Result<Vec<UserSettings>, SchedulerError> {
        UserSettings::all_enabled(&self.db.pool)
            .await
            .map_err(SchedulerError::SettingsUnavailable)
    }
}
