use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::Command;
use crate::bot::handlers::{BotHandler, HandlerResult};
use crate::database::models::User;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: BotHandler,
) -> HandlerResult {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::Start => {
            if let Some(from) = msg.from() {
                let result = User::upsert(
                    &ctx.db.pool,
                    from.id.0 as i64,
                    from.username.clone(),
                    Some(from.first_name.clone()),
                )
                .await;
                if let Err(e) = result {
                    tracing::error!("Failed to register user {}: {}", from.id, e);
                }
            }

            bot.send_message(
                msg.chat.id,
                "☪️ Welcome to the Adkar Reminder Bot!\n\n\
                 Use /prayertimes to see today's prayer times.\n\
                 Use /morningadkar, /eveningadkar, /sleepadkar and /dhikr to set up reminders.\n\
                 Use /help to see all commands.",
            )
            .await?;
        }
        Command::PrayerTimes => {
            crate::bot::commands::prayer::handle_prayer_times(
                bot,
                msg,
                &ctx.db,
                ctx.timings,
                &ctx.default_city,
                &ctx.default_country,
                ctx.tz,
            )
            .await?;
        }
        Command::PrayerReminders => {
            crate::bot::commands::adkar::handle_prayer_reminders(bot, msg).await?;
        }
        Command::MorningAdkar => {
            crate::bot::commands::adkar::handle_morning_adkar(bot, msg).await?;
        }
        Command::EveningAdkar => {
            crate::bot::commands::adkar::handle_evening_adkar(bot, msg).await?;
        }
        Command::SleepAdkar => {
            crate::bot::commands::adkar::handle_sleep_adkar(bot, msg).await?;
        }
        Command::Dhikr => {
            crate::bot::commands::adkar::handle_dhikr(bot, msg).await?;
        }
        Command::Settings => {
            crate::bot::commands::settings::handle_settings(
                bot,
                msg,
                &ctx.db,
                &ctx.default_city,
                &ctx.default_country,
            )
            .await?;
        }
    }
    Ok(())
}
