use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::database::connection::DatabaseManager;
use crate::database::models::UserSettings;
use crate::utils::validation::validate_telegram_user_id;

fn status(enabled: bool) -> &'static str {
    if enabled {
        "✅ on"
    } else {
        "❌ off"
    }
}

/// Shows the user's current reminder toggles and location.
pub async fn handle_settings(
    bot: Bot,
    msg: Message,
    db: &DatabaseManager,
    default_city: &str,
    default_country: &str,
) -> ResponseResult<()> {
    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);

    if let Err(e) = validate_telegram_user_id(user_id) {
        bot.send_message(msg.chat.id, format!("❌ Invalid user: {e}"))
            .await?;
        return Ok(());
    }

    let settings = match UserSettings::find_by_user(&db.pool, user_id).await {
        Ok(Some(settings)) => settings,
        Ok(None) => UserSettings::disabled(user_id, default_city, default_country),
        Err(e) => {
            tracing::error!("Failed to load settings for user {}: {}", user_id, e);
            bot.send_message(msg.chat.id, "❌ Error reading your settings.")
                .await?;
            return Ok(());
        }
    };

    let dhikr = settings
        .dhikr_interval_hours
        .map(|h| format!("✅ every {h} hours"))
        .unwrap_or_else(|| "❌ off".to_string());

    let text = format!(
        "⚙️ *Your Reminder Settings*\n\n\
         🕌 Prayer reminders: {}\n\
         🌅 Morning adkar: {}\n\
         🌇 Evening adkar: {}\n\
         😴 Adkar before sleep: {}\n\
         💝 Allahu Allah dhikr: {}\n\n\
         📍 Location: {}, {}",
        status(settings.prayer_reminders),
        status(settings.morning_adkar),
        status(settings.evening_adkar),
        status(settings.sleep_adkar),
        dhikr,
        settings.city,
        settings.country,
    );

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Markdown)
        .await?;

    Ok(())
}
