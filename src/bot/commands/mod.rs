pub mod adkar;
pub mod prayer;
pub mod settings;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Adkar Reminder Bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show today's prayer times")]
    PrayerTimes,
    #[command(description = "Toggle prayer time notifications")]
    PrayerReminders,
    #[command(description = "Toggle morning adkar (15 mins after Fajr)")]
    MorningAdkar,
    #[command(description = "Toggle evening adkar (30 mins after Asr)")]
    EveningAdkar,
    #[command(description = "Toggle adkar before sleep (1 hour after Isha)")]
    SleepAdkar,
    #[command(description = "Set interval dhikr reminders")]
    Dhikr,
    #[command(description = "Show your current reminder settings")]
    Settings,
}
