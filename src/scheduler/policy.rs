//! Pure translation from a user's reminder settings plus one day's prayer
//! timetable into the set of jobs that should be live for that user.
//!
//! Nothing here touches the job runner, the database, or the clock; the
//! current instant is an explicit argument so every rule is testable.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Utc};

use crate::database::models::UserSettings;
use crate::error::SchedulerError;
use crate::utils::datetime::{next_occurrence, parse_hhmm, shift_minutes};

/// Minutes after Fajr at which the morning adkar goes out.
const MORNING_OFFSET_MIN: i64 = 15;
/// Minutes after Asr for the evening adkar.
const EVENING_OFFSET_MIN: i64 = 30;
/// Minutes after Isha for the before-sleep adkar.
const SLEEP_OFFSET_MIN: i64 = 60;
/// Lead time of the "prayer soon" notification.
const PRAYER_LEAD_MIN: i64 = 10;

/// The five canonical daily prayers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Capitalized name for user-facing messages.
    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }

    /// Lowercase name used inside deterministic job ids.
    pub fn id_part(&self) -> &'static str {
        match self {
            Prayer::Fajr => "fajr",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Maghrib => "maghrib",
            Prayer::Isha => "isha",
        }
    }
}

/// One day's prayer timetable for a location, in the fixed local timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerTimings {
    pub fajr: NaiveTime,
    pub sunrise: NaiveTime,
    pub dhuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,
}

impl PrayerTimings {
    /// Builds a timetable from the six "HH:MM" strings a source returns.
    pub fn from_strings(
        fajr: &str,
        sunrise: &str,
        dhuhr: &str,
        asr: &str,
        maghrib: &str,
        isha: &str,
    ) -> Result<Self, SchedulerError> {
        Ok(Self {
            fajr: parse_hhmm(fajr)?,
            sunrise: parse_hhmm(sunrise)?,
            dhuhr: parse_hhmm(dhuhr)?,
            asr: parse_hhmm(asr)?,
            maghrib: parse_hhmm(maghrib)?,
            isha: parse_hhmm(isha)?,
        })
    }

    pub fn time_of(&self, prayer: Prayer) -> NaiveTime {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }
}

/// The reminder kinds a user can have jobs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    MorningAdkar,
    EveningAdkar,
    SleepAdkar,
    DhikrInterval,
    PrayerSoon,
    PrayerTime,
}

/// When a job should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Recurring, every day at this local wall-clock time.
    DailyAt { hour: u32, minute: u32 },
    /// Recurring, every N hours starting one period from registration.
    EveryHours(u32),
    /// One-shot at an absolute instant.
    OneShotAt(DateTime<Utc>),
}

/// A job the scheduling service should keep live for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub id: String,
    pub kind: JobKind,
    pub prayer: Option<Prayer>,
    pub trigger: Trigger,
}

/// Deterministic job id for (user, kind, prayer). Reschedules replace by id.
pub fn job_id(kind: JobKind, user_id: i64, prayer: Option<Prayer>) -> String {
    match (kind, prayer) {
        (JobKind::MorningAdkar, _) => format!("morning_adkar_{user_id}"),
        (JobKind::EveningAdkar, _) => format!("evening_adkar_{user_id}"),
        (JobKind::SleepAdkar, _) => format!("sleep_adkar_{user_id}"),
        (JobKind::DhikrInterval, _) => format!("dhikr_interval_{user_id}"),
        (JobKind::PrayerSoon, Some(p)) => format!("prayer_soon_{user_id}_{}", p.id_part()),
        (JobKind::PrayerSoon, None) => format!("prayer_soon_{user_id}"),
        (JobKind::PrayerTime, Some(p)) => format!("prayer_time_{user_id}_{}", p.id_part()),
        (JobKind::PrayerTime, None) => format!("prayer_time_{user_id}"),
    }
}

/// Every job id the reschedule diff may upsert or remove for this user.
///
/// When the timetable could not be fetched, prayer-time-dependent ids are
/// left out so their previously scheduled jobs survive until the next
/// successful refresh.
pub fn candidate_job_ids(user_id: i64, timings_available: bool) -> Vec<String> {
    let mut ids = vec![job_id(JobKind::DhikrInterval, user_id, None)];

    if timings_available {
        ids.push(job_id(JobKind::MorningAdkar, user_id, None));
        ids.push(job_id(JobKind::EveningAdkar, user_id, None));
        ids.push(job_id(JobKind::SleepAdkar, user_id, None));
        for prayer in Prayer::ALL {
            ids.push(job_id(JobKind::PrayerSoon, user_id, Some(prayer)));
            ids.push(job_id(JobKind::PrayerTime, user_id, Some(prayer)));
        }
    }

    ids
}

/// Computes the full desired job set for one user.
///
/// With `timings` absent only timing-independent specs are produced; the
/// caller already knows the timetable fetch failed and scopes its removal
/// diff with [`candidate_job_ids`] accordingly.
pub fn compute_jobs(
    settings: &UserSettings,
    timings: Option<&PrayerTimings>,
    now: DateTime<FixedOffset>,
) -> Vec<JobSpec> {
    let user_id = settings.user_id;
    let mut specs = Vec::new();

    if let Some(hours) = settings.dhikr_interval_hours {
        if hours > 0 {
            specs.push(JobSpec {
                id: job_id(JobKind::DhikrInterval, user_id, None),
                kind: JobKind::DhikrInterval,
                prayer: None,
                trigger: Trigger::EveryHours(hours as u32),
            });
        }
    }

    let Some(timings) = timings else {
        return specs;
    };

    if settings.morning_adkar {
        let (hour, minute) = shift_minutes(timings.fajr, MORNING_OFFSET_MIN);
        specs.push(JobSpec {
            id: job_id(JobKind::MorningAdkar, user_id, None),
            kind: JobKind::MorningAdkar,
            prayer: None,
            trigger: Trigger::DailyAt { hour, minute },
        });
    }

    if settings.evening_adkar {
        let (hour, minute) = shift_minutes(timings.asr, EVENING_OFFSET_MIN);
        specs.push(JobSpec {
            id: job_id(JobKind::EveningAdkar, user_id, None),
            kind: JobKind::EveningAdkar,
            prayer: None,
            trigger: Trigger::DailyAt { hour, minute },
        });
    }

    if settings.sleep_adkar {
        let (hour, minute) = shift_minutes(timings.isha, SLEEP_OFFSET_MIN);
        specs.push(JobSpec {
            id: job_id(JobKind::SleepAdkar, user_id, None),
            kind: JobKind::SleepAdkar,
            prayer: None,
            trigger: Trigger::DailyAt { hour, minute },
        });
    }

    if settings.prayer_reminders {
        for prayer in Prayer::ALL {
            // Past prayer times roll to the same wall-clock time tomorrow.
            let at = next_occurrence(timings.time_of(prayer), now);
            let soon = at - Duration::minutes(PRAYER_LEAD_MIN);

            if soon > now {
                specs.push(JobSpec {
                    id: job_id(JobKind::PrayerSoon, user_id, Some(prayer)),
                    kind: JobKind::PrayerSoon,
                    prayer: Some(prayer),
                    trigger: Trigger::OneShotAt(soon),
                });
            }

            specs.push(JobSpec {
                id: job_id(JobKind::PrayerTime, user_id, Some(prayer)),
                kind: JobKind::PrayerTime,
                prayer: Some(prayer),
                trigger: Trigger::OneShotAt(at),
            });
        }
    }

    specs
}
