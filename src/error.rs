use thiserror::Error;
use tokio_cron_scheduler::JobSchedulerError;

/// Failure modes of the scheduling core.
///
/// None of these are fatal: the worst outcome is that one user's reminders
/// stay stale until the next successful daily refresh.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// No prayer timetable could be resolved for a location and date.
    /// Prayer-time-dependent jobs are simply not rescheduled this cycle;
    /// previously registered recurring jobs stay live.
    #[error("prayer timings unavailable for {city}, {country}")]
    TimingsUnavailable { city: String, country: String },

    /// The settings store could not be read. A population-wide refresh
    /// exits early with a warning instead of partially scheduling.
    #[error("settings store unavailable: {0}")]
    SettingsUnavailable(#[source] sqlx::Error),

    /// Delivering a rendered message to one user failed. Swallowed and
    /// logged at the call site; never aborts a batch.
    #[error("delivery to user {user_id} failed: {source}")]
    Delivery {
        user_id: i64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The underlying job runner rejected an operation.
    #[error("job runner error: {0}")]
    JobRunner(#[from] JobSchedulerError),

    /// A time-of-day value from a prayer source could not be parsed.
    #[error("invalid time-of-day value '{0}'")]
    InvalidTiming(String),
}
