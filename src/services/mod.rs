pub mod health;
pub mod notifier;
pub mod prayer_times;
