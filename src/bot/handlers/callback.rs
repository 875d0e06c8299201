use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::handlers::{BotHandler, HandlerResult};
use crate::database::models::UserSettings;
use crate::utils::validation::validate_dhikr_interval;

/// Applies a reminder toggle from an inline keyboard and reschedules the
/// user synchronously so the change is observed by the next firing.
pub async fn callback_handler(bot: Bot, q: CallbackQuery, ctx: BotHandler) -> HandlerResult {
    let user_id = q.from.id.0 as i64;

    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id)
            .text("Invalid callback data format")
            .await?;
        return Ok(());
    };

    tracing::info!("Callback received: '{}' from user {}", data, user_id);

    let Some((kind, value)) = data.split_once(':') else {
        bot.answer_callback_query(q.id)
            .text("Invalid callback data format")
            .await?;
        return Ok(());
    };

    let mut settings = match UserSettings::find_by_user(&ctx.db.pool, user_id).await {
        Ok(Some(settings)) => settings,
        Ok(None) => UserSettings::disabled(user_id, &ctx.default_city, &ctx.default_country),
        Err(e) => {
            tracing::error!("Failed to load settings for user {}: {}", user_id, e);
            bot.answer_callback_query(q.id)
                .text("An error occurred. Please try again.")
                .show_alert(true)
                .await?;
            return Ok(());
        }
    };

    let dhikr_before = settings.dhikr_interval_hours;

    let confirmation = match apply_toggle(&mut settings, kind, value) {
        Some(text) => text,
        None => {
            bot.answer_callback_query(q.id)
                .text("Unknown setting")
                .await?;
            return Ok(());
        }
    };

    if let Err(e) = settings.save(&ctx.db.pool).await {
        tracing::error!("Failed to save settings for user {}: {}", user_id, e);
        bot.answer_callback_query(q.id)
            .text("An error occurred. Please try again.")
            .show_alert(true)
            .await?;
        return Ok(());
    }

    // Reschedule immediately so the change is observed by the next firing.
    if let Err(e) = ctx.service.reschedule_user(user_id).await {
        tracing::error!("Failed to reschedule user {}: {}", user_id, e);
    }

    // A freshly enabled dhikr interval gets its first reminder right away.
    // Refreshes and interval changes go through reschedule_user alone.
    if dhikr_newly_enabled(dhikr_before, settings.dhikr_interval_hours) {
        if let Err(e) = ctx.service.send_dhikr_now(user_id).await {
            tracing::error!("Failed to send first dhikr to user {}: {}", user_id, e);
        }
    }

    if let Some(msg) = q.message.as_ref() {
        bot.send_message(msg.chat.id, confirmation)
            .parse_mode(ParseMode::Markdown)
            .await?;
    }
    bot.answer_callback_query(q.id).await?;

    Ok(())
}

/// True only on the disabled-to-enabled transition; an interval change
/// (already enabled) or a no-op does not count.
fn dhikr_newly_enabled(before: Option<i64>, after: Option<i64>) -> bool {
    before.is_none() && after.is_some()
}

/// Mutates one settings field from callback data, returning the
/// confirmation message, or None for unrecognized data.
fn apply_toggle(settings: &mut UserSettings, kind: &str, value: &str) -> Option<String> {
    match (kind, value) {
        ("prayers", "on") => {
            settings.prayer_reminders = true;
            Some(
                "🕌 *Prayer Reminders Enabled*\n\nYou will be notified 10 minutes before and at each prayer time."
                    .to_string(),
            )
        }
        ("prayers", "off") => {
            settings.prayer_reminders = false;
            Some("❌ *Prayer Reminders Disabled*".to_string())
        }
        ("morning", "on") => {
            settings.morning_adkar = true;
            Some(
                "🌅 *Morning Adkar Enabled*\n\nYou will receive morning adkar 15 mins after Fajr."
                    .to_string(),
            )
        }
        ("morning", "off") => {
            settings.morning_adkar = false;
            Some("❌ *Morning Adkar Disabled*".to_string())
        }
        ("evening", "on") => {
            settings.evening_adkar = true;
            Some(
                "🌇 *Evening Adkar Enabled*\n\nYou will receive evening adkar 30 mins after Asr."
                    .to_string(),
            )
        }
        ("evening", "off") => {
            settings.evening_adkar = false;
            Some("❌ *Evening Adkar Disabled*".to_string())
        }
        ("sleep", "on") => {
            settings.sleep_adkar = true;
            Some(
                "😴 *Adkar Before Sleep Enabled*\n\nYou will receive adkar 1 hour after Isha."
                    .to_string(),
            )
        }
        ("sleep", "off") => {
            settings.sleep_adkar = false;
            Some("❌ *Adkar Before Sleep Disabled*".to_string())
        }
        ("dhikr", "off") => {
            settings.dhikr_interval_hours = None;
            Some("❌ *Allahu Allah Dhikr Disabled*".to_string())
        }
        ("dhikr", raw) => {
            let hours: i64 = raw.parse().ok()?;
            validate_dhikr_interval(hours).ok()?;
            settings.dhikr_interval_hours = Some(hours);
            Some(format!(
                "💝 *Allahu Allah Dhikr Enabled*\n\nYou have received your first reminder. You will continue to receive reminders every {hours} hours."
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn settings() -> UserSettings {
        UserSettings::disabled(42, "Singapore", "Singapore")
    }

    #[test]
    fn test_apply_toggle_morning_on_off() {
        let mut s = settings();
        assert!(apply_toggle(&mut s, "morning", "on").is_some());
        assert!(s.morning_adkar);
        assert!(apply_toggle(&mut s, "morning", "off").is_some());
        assert!(!s.morning_adkar);
    }

    #[test]
    fn test_apply_toggle_dhikr_intervals() {
        let mut s = settings();
        assert!(apply_toggle(&mut s, "dhikr", "4").is_some());
        assert_eq!(s.dhikr_interval_hours, Some(4));
        assert!(apply_toggle(&mut s, "dhikr", "off").is_some());
        assert_eq!(s.dhikr_interval_hours, None);
    }

    #[test]
    fn test_apply_toggle_dhikr_rejects_unknown_interval() {
        let mut s = settings();
        assert!(apply_toggle(&mut s, "dhikr", "3").is_none());
        assert!(apply_toggle(&mut s, "dhikr", "abc").is_none());
        assert_eq!(s.dhikr_interval_hours, None);
    }

    #[test]
    fn test_apply_toggle_unknown_kind() {
        let mut s = settings();
        assert!(apply_toggle(&mut s, "nonsense", "on").is_none());
    }

    #[test]
    fn test_dhikr_newly_enabled_only_on_transition() {
        assert!(dhikr_newly_enabled(None, Some(2)));
        // Interval change while already enabled
        assert!(!dhikr_newly_enabled(Some(2), Some(4)));
        // Disable and no-op
        assert!(!dhikr_newly_enabled(Some(2), None));
        assert!(!dhikr_newly_enabled(None, None));
    }
}
