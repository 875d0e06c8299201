#![allow(clippy::unwrap_used, clippy::panic)]

use adkar_reminder_bot::database::models::UserSettings;
use adkar_reminder_bot::scheduler::policy::{
    candidate_job_ids, compute_jobs, job_id, JobKind, Prayer, PrayerTimings, Trigger,
};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Timelike};

fn sgt() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

fn noon() -> DateTime<FixedOffset> {
    sgt().with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

fn timings() -> PrayerTimings {
    PrayerTimings::from_strings("05:10", "07:05", "13:00", "16:45", "19:10", "23:40").unwrap()
}

fn disabled(user_id: i64) -> UserSettings {
    UserSettings::disabled(user_id, "Singapore", "Singapore")
}

#[test]
fn test_morning_adkar_fifteen_minutes_after_fajr() {
    let mut settings = disabled(42);
    settings.morning_adkar = true;

    let specs = compute_jobs(&settings, Some(&timings()), noon());

    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].id, "morning_adkar_42");
    assert_eq!(specs[0].kind, JobKind::MorningAdkar);
    assert_eq!(specs[0].trigger, Trigger::DailyAt { hour: 5, minute: 25 });
}

#[test]
fn test_evening_adkar_rolls_minute_across_hour() {
    let mut settings = disabled(7);
    settings.evening_adkar = true;

    let specs = compute_jobs(&settings, Some(&timings()), noon());

    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].id, "evening_adkar_7");
    assert_eq!(specs[0].trigger, Trigger::DailyAt { hour: 17, minute: 15 });
}

#[test]
fn test_sleep_adkar_rolls_hour_across_midnight() {
    let mut settings = disabled(7);
    settings.sleep_adkar = true;

    let specs = compute_jobs(&settings, Some(&timings()), noon());

    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].id, "sleep_adkar_7");
    assert_eq!(specs[0].trigger, Trigger::DailyAt { hour: 0, minute: 40 });
}

#[test]
fn test_dhikr_interval_produces_repeating_job() {
    let mut settings = disabled(9);
    settings.dhikr_interval_hours = Some(4);

    let specs = compute_jobs(&settings, Some(&timings()), noon());

    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].id, "dhikr_interval_9");
    assert_eq!(specs[0].trigger, Trigger::EveryHours(4));
}

#[test]
fn test_dhikr_disabled_produces_nothing() {
    let settings = disabled(9);
    let specs = compute_jobs(&settings, Some(&timings()), noon());
    assert!(specs.is_empty());
}

#[test]
fn test_prayer_reminders_emit_soon_and_on_time_jobs() {
    let mut settings = disabled(5);
    settings.prayer_reminders = true;

    // 06:00, before every prayer except Fajr
    let now = sgt().with_ymd_and_hms(2026, 3, 10, 6, 0, 0).unwrap();
    let specs = compute_jobs(&settings, Some(&timings()), now);

    // Five on-time jobs; Fajr (05:10 past, rolled to tomorrow) keeps its
    // soon job too, so all ten are present.
    let on_time = specs
        .iter()
        .filter(|s| s.kind == JobKind::PrayerTime)
        .count();
    let soon = specs.iter().filter(|s| s.kind == JobKind::PrayerSoon).count();
    assert_eq!(on_time, 5);
    assert_eq!(soon, 5);
}

#[test]
fn test_past_prayer_rolls_to_tomorrow() {
    let mut settings = disabled(5);
    settings.prayer_reminders = true;

    // 14:00, one hour after Dhuhr
    let now = sgt().with_ymd_and_hms(2026, 3, 10, 14, 0, 0).unwrap();
    let specs = compute_jobs(&settings, Some(&timings()), now);

    let dhuhr = specs
        .iter()
        .find(|s| s.id == job_id(JobKind::PrayerTime, 5, Some(Prayer::Dhuhr)))
        .unwrap();

    let Trigger::OneShotAt(at) = dhuhr.trigger else {
        panic!("expected one-shot trigger");
    };
    let local = at.with_timezone(&sgt());
    assert_eq!(local.date_naive(), now.date_naive() + Duration::days(1));
    assert_eq!((local.hour(), local.minute()), (13, 0));
}

#[test]
fn test_soon_job_suppressed_inside_lead_window() {
    let mut settings = disabled(5);
    settings.prayer_reminders = true;

    // 12:55, five minutes before Dhuhr: the 10-minute warning is already
    // in the past but the on-time job is still due today.
    let now = sgt().with_ymd_and_hms(2026, 3, 10, 12, 55, 0).unwrap();
    let specs = compute_jobs(&settings, Some(&timings()), now);

    let soon_id = job_id(JobKind::PrayerSoon, 5, Some(Prayer::Dhuhr));
    assert!(!specs.iter().any(|s| s.id == soon_id));

    let on_time = specs
        .iter()
        .find(|s| s.id == job_id(JobKind::PrayerTime, 5, Some(Prayer::Dhuhr)))
        .unwrap();
    let Trigger::OneShotAt(at) = on_time.trigger else {
        panic!("expected one-shot trigger");
    };
    assert_eq!(at.with_timezone(&sgt()).date_naive(), now.date_naive());
}

#[test]
fn test_missing_timings_only_emit_timing_independent_jobs() {
    let mut settings = disabled(3);
    settings.morning_adkar = true;
    settings.prayer_reminders = true;
    settings.dhikr_interval_hours = Some(2);

    let specs = compute_jobs(&settings, None, noon());

    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].kind, JobKind::DhikrInterval);
}

#[test]
fn test_candidate_ids_scoped_by_timings_availability() {
    let without = candidate_job_ids(1, false);
    assert_eq!(without, vec!["dhikr_interval_1".to_string()]);

    let with = candidate_job_ids(1, true);
    // dhikr + three adkar + five prayers x two jobs
    assert_eq!(with.len(), 14);
    assert!(with.contains(&"morning_adkar_1".to_string()));
    assert!(with.contains(&"prayer_soon_1_fajr".to_string()));
    assert!(with.contains(&"prayer_time_1_isha".to_string()));
}

#[test]
fn test_end_to_end_morning_only_user() {
    let mut settings = disabled(42);
    settings.morning_adkar = true;

    let timings =
        PrayerTimings::from_strings("05:12", "07:05", "13:05", "16:30", "19:10", "20:30").unwrap();
    let specs = compute_jobs(&settings, Some(&timings), noon());

    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].id, "morning_adkar_42");
    assert_eq!(specs[0].trigger, Trigger::DailyAt { hour: 5, minute: 27 });
}
