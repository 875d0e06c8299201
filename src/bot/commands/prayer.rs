use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::database::connection::DatabaseManager;
use crate::database::models::UserSettings;
use crate::services::prayer_times::PrayerTimeSource;

/// Shows today's six timings for the user's configured location.
#[allow(clippy::too_many_arguments)]
pub async fn handle_prayer_times(
    bot: Bot,
    msg: Message,
    db: &DatabaseManager,
    timings: Arc<dyn PrayerTimeSource>,
    default_city: &str,
    default_country: &str,
    tz: FixedOffset,
) -> ResponseResult<()> {
    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(msg.chat.id.0);

    let (city, country) = match UserSettings::find_by_user(&db.pool, user_id).await {
        Ok(Some(settings)) => (settings.city, settings.country),
        Ok(None) => (default_city.to_string(), default_country.to_string()),
        Err(e) => {
            tracing::error!("Failed to load settings for user {}: {}", user_id, e);
            (default_city.to_string(), default_country.to_string())
        }
    };

    let today = Utc::now().with_timezone(&tz).date_naive();
    let timetable = match timings.get_times(&city, &country, today).await {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!("Prayer times lookup failed for user {}: {}", user_id, e);
            bot.send_message(
                msg.chat.id,
                "❌ Unable to fetch prayer times right now. Please try again later.",
            )
            .await?;
            return Ok(());
        }
    };

    let text = format!(
        "🕋 *Prayer Times Today ({city})*\n{date}\n\n\
         🌄 Fajr: {fajr}\n\
         🌅 Syuruk: {sunrise}\n\
         ☀️ Dhuhr: {dhuhr}\n\
         🌤 Asr: {asr}\n\
         🌇 Maghrib: {maghrib}\n\
         🌙 Isha: {isha}",
        date = today.format("%d %B %Y"),
        fajr = timetable.fajr.format("%H:%M"),
        sunrise = timetable.sunrise.format("%H:%M"),
        dhuhr = timetable.dhuhr.format("%H:%M"),
        asr = timetable.asr.format("%H:%M"),
        maghrib = timetable.maghrib.format("%H:%M"),
        isha = timetable.isha.format("%H:%M"),
    );

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Markdown)
        .await?;

    Ok(())
}
