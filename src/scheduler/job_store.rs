//! Adapter over [`tokio_cron_scheduler::JobScheduler`] that keys jobs by a
//! deterministic string id and gives atomic replace-by-id semantics.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration as StdDuration;

use chrono::{FixedOffset, Utc};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::error::SchedulerError;
use crate::scheduler::policy::Trigger;

/// Builds a runner [`Job`] from a trigger spec.
///
/// Daily triggers are expressed in the fixed local timezone and converted
/// to a UTC cron expression here, since the runner evaluates cron in UTC.
pub fn build_job<F>(trigger: &Trigger, tz: FixedOffset, run: F) -> Result<Job, SchedulerError>
where
    F: 'static
        + Send
        + Sync
        + FnMut(Uuid, JobScheduler) -> Pin<Box<dyn Future<Output = ()> + Send>>,
{
    let job = match trigger {
        Trigger::DailyAt { hour, minute } => {
            let expr = daily_cron_utc(*hour, *minute, tz);
            Job::new_async(expr.as_str(), run)?
        }
        Trigger::EveryHours(hours) => {
            let period = StdDuration::from_secs(u64::from(*hours) * 3600);
            Job::new_repeated_async(period, run)?
        }
        Trigger::OneShotAt(when) => {
            // A spec computed in the past degenerates to "fire now".
            let delay = (*when - Utc::now()).to_std().unwrap_or(StdDuration::ZERO);
            Job::new_one_shot_async(delay, run)?
        }
    };

    Ok(job)
}

/// Converts a local wall-clock (hour, minute) into a six-field UTC cron
/// expression firing once per day.
fn daily_cron_utc(hour: u32, minute: u32, tz: FixedOffset) -> String {
    let local_minutes = (hour * 60 + minute) as i32;
    let offset_minutes = tz.local_minus_utc() / 60;
    let utc_minutes = (local_minutes - offset_minutes).rem_euclid(24 * 60) as u32;

    format!("0 {} {} * * *", utc_minutes % 60, utc_minutes / 60)
}

/// Job table keyed by deterministic id.
///
/// Invariant: at most one live runner job per id. `upsert` replaces under
/// the map lock (cancel-then-add), so concurrent reschedules for the same
/// user converge on the last writer.
pub struct JobStore {
    scheduler: JobScheduler,
    jobs: Mutex<HashMap<String, Uuid>>,
}

impl JobStore {
    pub async fn new() -> Result<Self, SchedulerError> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            scheduler,
            jobs: Mutex::new(HashMap::new()),
        })
    }

    /// Starts firing registered jobs.
    pub async fn start(&self) -> Result<(), SchedulerError> {
        let mut scheduler = self.scheduler.clone();
        scheduler.start().await?;
        Ok(())
    }

    pub async fn shutdown(&self) -> Result<(), SchedulerError> {
        let mut scheduler = self.scheduler.clone();
        scheduler.shutdown().await?;
        Ok(())
    }

    /// Registers `job` under `job_id`, cancelling any previous job with the
    /// same id first. The two steps happen under the map lock so no id ever
    /// has two live incarnations.
    pub async fn upsert(&self, job_id: &str, job: Job) -> Result<(), SchedulerError> {
        let mut jobs = self.jobs.lock().await;

        if let Some(stale) = jobs.remove(job_id) {
            // Removal of an already-consumed one-shot is a no-op.
            let _ = self.scheduler.remove(&stale).await;
        }

        let uuid = job.guid();
        self.scheduler.add(job).await?;
        jobs.insert(job_id.to_string(), uuid);

        Ok(())
    }

    /// Cancels the job under `job_id` if one exists. Removing a nonexistent
    /// id is a no-op, not a failure.
    pub async fn remove(&self, job_id: &str) -> Result<(), SchedulerError> {
        let mut jobs = self.jobs.lock().await;

        if let Some(uuid) = jobs.remove(job_id) {
            let _ = self.scheduler.remove(&uuid).await;
        }

        Ok(())
    }

    /// True while `job_id` is registered. A consumed one-shot stays
    /// registered until the next reschedule replaces or removes it.
    pub async fn exists(&self, job_id: &str) -> bool {
        self.jobs.lock().await.contains_key(job_id)
    }

    /// Sorted snapshot of the registered job ids, consumed one-shots
    /// included.
    pub async fn job_ids(&self) -> Vec<String> {
        let jobs = self.jobs.lock().await;
        let mut ids: Vec<String> = jobs.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of registered jobs, not pending firings: a one-shot that
    /// already fired counts until the next refresh reconciles it.
    pub async fn count(&self) -> usize {
        self.jobs.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_daily_cron_conversion_sgt() {
        let sgt = FixedOffset::east_opt(8 * 3600).unwrap();
        // 05:25 SGT is 21:25 UTC the previous day
        assert_eq!(daily_cron_utc(5, 25, sgt), "0 25 21 * * *");
        // 00:01 SGT is 16:01 UTC
        assert_eq!(daily_cron_utc(0, 1, sgt), "0 1 16 * * *");
    }

    #[test]
    fn test_daily_cron_conversion_utc() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(daily_cron_utc(13, 0, utc), "0 0 13 * * *");
    }
}
