use anyhow::{anyhow, Result};
use chrono::{FixedOffset, Offset, Utc};
use std::env;

/// Singapore civil time, the timezone all trigger times are expressed in.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 480;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    pub default_city: String,
    pub default_country: String,
    pub utc_offset_minutes: i32,
    pub prayer_api_url: String,
    pub prayer_method: u8,
    pub muis_csv_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/adkar.db".to_string());
        let database_url = if database_url.trim().is_empty() {
            "sqlite:./data/adkar.db".to_string()
        } else {
            database_url
        };

        let port_str = env::var("HTTP_PORT").unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let default_city =
            env::var("DEFAULT_CITY").unwrap_or_else(|_| "Singapore".to_string());
        let default_country =
            env::var("DEFAULT_COUNTRY").unwrap_or_else(|_| "Singapore".to_string());

        let utc_offset_minutes = match env::var("UTC_OFFSET_MINUTES") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid UTC_OFFSET_MINUTES"))?,
            Err(_) => DEFAULT_UTC_OFFSET_MINUTES,
        };
        if utc_offset_minutes <= -24 * 60 || utc_offset_minutes >= 24 * 60 {
            return Err(anyhow!("UTC_OFFSET_MINUTES out of range"));
        }

        let prayer_api_url = env::var("PRAYER_API_URL")
            .unwrap_or_else(|_| "https://api.aladhan.com/v1/timingsByCity".to_string());

        // Muslim World League
        let prayer_method = 3;

        let muis_csv_path = env::var("MUIS_CSV_PATH").ok().filter(|p| !p.trim().is_empty());

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            default_city,
            default_country,
            utc_offset_minutes,
            prayer_api_url,
            prayer_method,
            muis_csv_path,
        })
    }

    /// The fixed local timezone every trigger time is computed in.
    pub fn timezone(&self) -> FixedOffset {
        // Range is validated in from_env; fall back to UTC rather than panic.
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}
