use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Utc};

use crate::error::SchedulerError;

/// Parses a wall-clock "HH:MM" value. Tolerates trailing annotations such
/// as "05:12 (+08)" which some prayer time APIs append.
pub fn parse_hhmm(raw: &str) -> Result<NaiveTime, SchedulerError> {
    let clean = raw
        .split_whitespace()
        .next()
        .ok_or_else(|| SchedulerError::InvalidTiming(raw.to_string()))?;

    NaiveTime::parse_from_str(clean, "%H:%M")
        .map_err(|_| SchedulerError::InvalidTiming(raw.to_string()))
}

/// Adds minutes to a time-of-day, wrapping modulo 24 hours, and returns
/// the resulting (hour, minute) pair for a daily trigger.
pub fn shift_minutes(time: NaiveTime, minutes: i64) -> (u32, u32) {
    use chrono::Timelike;

    let shifted = time + Duration::minutes(minutes);
    (shifted.hour(), shifted.minute())
}

/// The next instant at which the given local time-of-day occurs: today if
/// still ahead of `now`, otherwise the same time tomorrow.
pub fn next_occurrence(time: NaiveTime, now: DateTime<FixedOffset>) -> DateTime<Utc> {
    let offset_secs = i64::from(now.offset().local_minus_utc());
    let to_utc = |local: chrono::NaiveDateTime| {
        DateTime::<Utc>::from_naive_utc_and_offset(local - Duration::seconds(offset_secs), Utc)
    };

    let today = now.date_naive().and_time(time);
    let candidate = to_utc(today);
    if candidate >= now {
        candidate
    } else {
        to_utc(today + Duration::days(1))
    }
}
