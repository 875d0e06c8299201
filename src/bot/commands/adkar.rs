use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};

fn toggle_keyboard(prefix: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Enable", format!("{prefix}:on")),
        InlineKeyboardButton::callback("❌ Disable", format!("{prefix}:off")),
    ]])
}

pub async fn handle_prayer_reminders(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(
        msg.chat.id,
        "🕌 *Prayer Reminders*\n\nEnable notifications 10 minutes before and at each prayer time?",
    )
    .reply_markup(toggle_keyboard("prayers"))
    .parse_mode(ParseMode::Markdown)
    .await?;

    Ok(())
}

pub async fn handle_morning_adkar(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(
        msg.chat.id,
        "🌅 *Morning Adkar Reminder*\n\nEnable daily morning adkar 15 mins after Fajr?",
    )
    .reply_markup(toggle_keyboard("morning"))
    .parse_mode(ParseMode::Markdown)
    .await?;

    Ok(())
}

pub async fn handle_evening_adkar(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(
        msg.chat.id,
        "🌇 *Evening Adkar Reminder*\n\nEnable daily evening adkar 30 mins after Asr?",
    )
    .reply_markup(toggle_keyboard("evening"))
    .parse_mode(ParseMode::Markdown)
    .await?;

    Ok(())
}

pub async fn handle_sleep_adkar(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(
        msg.chat.id,
        "😴 *Adkar Before Sleep*\n\nEnable nightly adkar 1 hour after Isha?",
    )
    .reply_markup(toggle_keyboard("sleep"))
    .parse_mode(ParseMode::Markdown)
    .await?;

    Ok(())
}

pub async fn handle_dhikr(bot: Bot, msg: Message) -> ResponseResult<()> {
    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("Every 2 hours", "dhikr:2"),
            InlineKeyboardButton::callback("Every 4 hours", "dhikr:4"),
            InlineKeyboardButton::callback("Every 6 hours", "dhikr:6"),
        ],
        vec![InlineKeyboardButton::callback("❌ Disable", "dhikr:off")],
    ]);

    bot.send_message(
        msg.chat.id,
        "💝 *Allahu Allah Dhikr Reminder*\n\nHow often would you like reminders?",
    )
    .reply_markup(keyboard)
    .parse_mode(ParseMode::Markdown)
    .await?;

    Ok(())
}
