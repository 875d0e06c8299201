use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One reminder-settings record per user. A missing row is equivalent to
/// all reminders disabled at the default location.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: i64,
    pub prayer_reminders: bool,
    pub morning_adkar: bool,
    pub evening_adkar: bool,
    pub sleep_adkar: bool,
    /// Hours between dhikr reminders (2, 4 or 6); NULL means disabled.
    pub dhikr_interval_hours: Option<i64>,
    pub city: String,
    pub country: String,
}

impl UserSettings {
    /// All-disabled settings at the given location.
    pub fn disabled(user_id: i64, city: &str, country: &str) -> Self {
        Self {
            user_id,
            prayer_reminders: false,
            morning_adkar: false,
            evening_adkar: false,
            sleep_adkar: false,
            dhikr_interval_hours: None,
            city: city.to_string(),
            country: country.to_string(),
        }
    }

    /// True when at least one reminder kind would produce a job.
    pub fn any_enabled(&self) -> bool {
        self.prayer_reminders
            || self.morning_adkar
            || self.evening_adkar
            || self.sleep_adkar
            || self.dhikr_interval_hours.is_some()
    }

    pub async fn find_by_user(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserSettings>(
            "SELECT user_id, prayer_reminders, morning_adkar, evening_adkar, sleep_adkar,
                    dhikr_interval_hours, city, country
             FROM user_settings WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Inserts or replaces the whole settings record for this user.
    pub async fn save(&self, pool: &sqlx::SqlitePool) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO user_settings
                (user_id, prayer_reminders, morning_adkar, evening_adkar, sleep_adkar,
                 dhikr_interval_hours, city, country, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET
                prayer_reminders = excluded.prayer_reminders,
                morning_adkar = excluded.morning_adkar,
                evening_adkar = excluded.evening_adkar,
                sleep_adkar = excluded.sleep_adkar,
                dhikr_interval_hours = excluded.dhikr_interval_hours,
                city = excluded.city,
                country = excluded.country,
                updated_at = excluded.updated_at",
        )
        .bind(self.user_id)
        .bind(self.prayer_reminders)
        .bind(self.morning_adkar)
        .bind(self.evening_adkar)
        .bind(self.sleep_adkar)
        .bind(self.dhikr_interval_hours)
        .bind(&self.city)
        .bind(&self.country)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Every settings record with at least one reminder kind enabled.
    pub async fn all_enabled(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserSettings>(
            "SELECT user_id, prayer_reminders, morning_adkar, evening_adkar, sleep_adkar,
                    dhikr_interval_hours, city, country
             FROM user_settings
             WHERE prayer_reminders = 1 OR morning_adkar = 1 OR evening_adkar = 1
                OR sleep_adkar = 1 OR dhikr_interval_hours IS NOT NULL
             ORDER BY user_id",
        )
        .fetch_all(pool)
        .await
    }
}
