//! # Adkar Reminder Bot
//!
//! A Telegram bot that sends prayer time notifications and daily adkar
//! reminders to subscribed users.
//!
//! ## Features
//! - Five-prayer notifications (10 minutes before and on time)
//! - Morning, evening, and before-sleep adkar relative to prayer times
//! - Interval-based dhikr reminders (every 2/4/6 hours)
//! - Daily reschedule against each day's prayer timetable
//! - Persistent per-user settings with SQLite

/// Bot command handlers, keyboards, and message bodies
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Error taxonomy for the scheduling core
pub mod error;
/// Reminder policy, job store, and scheduling service
pub mod scheduler;
/// External collaborators: prayer time sources, notification sink, health
pub mod services;
/// Utility functions for time-of-day math and validation
pub mod utils;
