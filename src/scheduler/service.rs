//! Orchestrates the reminder policy against the job store for one user or
//! the whole population, and owns the daily refresh registration.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{FixedOffset, Utc};
use tokio_cron_scheduler::Job;
use tracing::{error, info, warn};

use crate::bot::texts;
use crate::database::models::UserSettings;
use crate::error::SchedulerError;
use crate::scheduler::job_store::{build_job, JobStore};
use crate::scheduler::policy::{self, JobKind, JobSpec, Prayer, Trigger};
use crate::services::notifier::NotificationSink;
use crate::services::prayer_times::PrayerTimeSource;

/// Job id of the population-wide daily refresh, registered once at boot.
const DAILY_REFRESH_ID: &str = "daily_refresh";

/// Read access to per-user reminder settings. A user without a record gets
/// the all-disabled default at the process-wide default location.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, user_id: i64) -> Result<UserSettings, SchedulerError>;
    async fn all_enabled(&self) -> Result<Vec<UserSettings>, SchedulerError>;
}

/// Everything a firing job needs to render and deliver its message.
#[derive(Clone)]
struct Deliverer {
    sink: Arc<dyn NotificationSink>,
    timings: Arc<dyn PrayerTimeSource>,
    tz: FixedOffset,
    city: String,
    country: String,
}

impl Deliverer {
    async fn deliver(&self, user_id: i64, kind: JobKind, prayer: Option<Prayer>) {
        let text = match kind {
            JobKind::MorningAdkar => {
                // The morning body quotes today's sunrise (Syuruk) time.
                let today = Utc::now().with_timezone(&self.tz).date_naive();
                let sunrise = self
                    .timings
                    .get_times(&self.city, &self.country, today)
                    .await
                    .ok()
                    .map(|t| t.sunrise);
                texts::morning_adkar(sunrise)
            }
            JobKind::EveningAdkar => texts::EVENING_ADKAR.to_string(),
            JobKind::SleepAdkar => texts::SLEEP_ADKAR.to_string(),
            JobKind::DhikrInterval => texts::DHIKR_REMINDER.to_string(),
            JobKind::PrayerSoon => texts::prayer_soon(prayer),
            JobKind::PrayerTime => texts::prayer_now(prayer),
        };

        if let Err(e) = self.sink.send(user_id, &text).await {
            error!("Failed to deliver {:?} to user {}: {}", kind, user_id, e);
        }
    }
}

/// Bridges [`policy`] and [`JobStore`]; collaborators are injected rather
/// than reached through globals.
pub struct SchedulingService {
    jobs: Arc<JobStore>,
    settings: Arc<dyn SettingsStore>,
    timings: Arc<dyn PrayerTimeSource>,
    sink: Arc<dyn NotificationSink>,
    tz: FixedOffset,
}

impl SchedulingService {
    pub fn new(
        jobs: Arc<JobStore>,
        settings: Arc<dyn SettingsStore>,
        timings: Arc<dyn PrayerTimeSource>,
        sink: Arc<dyn NotificationSink>,
        tz: FixedOffset,
    ) -> Self {
        Self {
            jobs,
            settings,
            timings,
            sink,
            tz,
        }
    }

    pub fn job_store(&self) -> Arc<JobStore> {
        Arc::clone(&self.jobs)
    }

    /// Registers the daily 00:01 refresh (prayer times change every day)
    /// and starts the job runner. Called once at process start.
    pub async fn start(self: &Arc<Self>) -> Result<(), SchedulerError> {
        let service = Arc::clone(self);
        let refresh = build_job(
            &Trigger::DailyAt { hour: 0, minute: 1 },
            self.tz,
            move |_uuid, _lock| {
                let service = Arc::clone(&service);
                Box::pin(async move {
                    service.reschedule_all().await;
                })
            },
        )?;

        self.jobs.upsert(DAILY_REFRESH_ID, refresh).await?;
        self.jobs.start().await?;

        info!("Scheduling service started - daily refresh at 00:01 local time");
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), SchedulerError> {
        self.jobs.shutdown().await
    }

    /// Recomputes and replaces the jobs of every user with at least one
    /// reminder enabled. One user's failure never aborts the others.
    pub async fn reschedule_all(&self) {
        let all = match self.settings.all_enabled().await {
            Ok(all) => all,
            Err(e) => {
                warn!("Settings store unavailable, skipping refresh: {}", e);
                return;
            }
        };

        let mut rescheduled = 0usize;
        for settings in &all {
            match self.apply_settings(settings).await {
                Ok(()) => rescheduled += 1,
                Err(e) => error!("Failed to reschedule user {}: {}", settings.user_id, e),
            }
        }

        info!("Rescheduled reminders for {}/{} users", rescheduled, all.len());
    }

    /// Fetches the user's current settings and makes the live job set match
    /// them. Called synchronously after every settings mutation and by the
    /// daily refresh; calling it twice in a row is a no-op the second time.
    pub async fn reschedule_user(&self, user_id: i64) -> Result<(), SchedulerError> {
        let settings = self.settings.get(user_id).await?;
        self.apply_settings(&settings).await
    }

    async fn apply_settings(&self, settings: &UserSettings) -> Result<(), SchedulerError> {
        let user_id = settings.user_id;
        let now = Utc::now().with_timezone(&self.tz);

        let timings = match self
            .timings
            .get_times(&settings.city, &settings.country, now.date_naive())
            .await
        {
            Ok(t) => Some(t),
            Err(SchedulerError::TimingsUnavailable { city, country }) => {
                // Prayer-dependent jobs keep their last-known triggers
                // until the next successful refresh.
                warn!(
                    "Prayer timings unavailable for {}, {}; keeping prior jobs for user {}",
                    city, country, user_id
                );
                None
            }
            Err(e) => return Err(e),
        };

        let specs = policy::compute_jobs(settings, timings.as_ref(), now);
        let desired: HashSet<&str> = specs.iter().map(|s| s.id.as_str()).collect();

        // Stale jobs for now-disabled kinds are removed before anything is
        // registered, so no id ever has two live incarnations.
        for id in policy::candidate_job_ids(user_id, timings.is_some()) {
            if !desired.contains(id.as_str()) {
                self.jobs.remove(&id).await?;
            }
        }

        for spec in &specs {
            let job = self.make_job(settings, spec)?;
            self.jobs.upsert(&spec.id, job).await?;
            info!("Scheduled {} with {:?}", spec.id, spec.trigger);
        }

        Ok(())
    }

    /// Delivers the dhikr reminder immediately.
    ///
    /// Called by the settings mutation site on the disabled-to-enabled
    /// transition; only that site can tell an enable apart from a daily
    /// refresh or an interval change, both of which must stay silent.
    pub async fn send_dhikr_now(&self, user_id: i64) -> Result<(), SchedulerError> {
        let settings = self.settings.get(user_id).await?;
        self.deliverer(&settings)
            .deliver(user_id, JobKind::DhikrInterval, None)
            .await;
        Ok(())
    }

    fn deliverer(&self, settings: &UserSettings) -> Deliverer {
        Deliverer {
            sink: Arc::clone(&self.sink),
            timings: Arc::clone(&self.timings),
            tz: self.tz,
            city: settings.city.clone(),
            country: settings.country.clone(),
        }
    }

    fn make_job(&self, settings: &UserSettings, spec: &JobSpec) -> Result<Job, SchedulerError> {
        let deliverer = self.deliverer(settings);
        let user_id = settings.user_id;
        let kind = spec.kind;
        let prayer = spec.prayer;

        build_job(&spec.trigger, self.tz, move |_uuid, _lock| {
            let deliverer = deliverer.clone();
            Box::pin(async move {
                deliverer.deliver(user_id, kind, prayer).await;
            })
        })
    }
}
