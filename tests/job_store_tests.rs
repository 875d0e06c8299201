#![allow(clippy::unwrap_used)]

use chrono::FixedOffset;
use tokio_cron_scheduler::Job;

use adkar_reminder_bot::scheduler::job_store::{build_job, JobStore};
use adkar_reminder_bot::scheduler::policy::Trigger;

fn sgt() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

fn idle_job(trigger: &Trigger) -> Job {
    build_job(trigger, sgt(), |_uuid, _lock| Box::pin(async {})).unwrap()
}

#[tokio::test]
async fn test_upsert_replaces_job_under_same_id() {
    let store = JobStore::new().await.unwrap();

    store
        .upsert("morning_adkar_1", idle_job(&Trigger::EveryHours(2)))
        .await
        .unwrap();
    store
        .upsert("morning_adkar_1", idle_job(&Trigger::EveryHours(4)))
        .await
        .unwrap();

    assert_eq!(store.count().await, 1);
    assert!(store.exists("morning_adkar_1").await);
}

#[tokio::test]
async fn test_remove_nonexistent_id_is_a_noop() {
    let store = JobStore::new().await.unwrap();

    store.remove("dhikr_interval_99").await.unwrap();
    assert_eq!(store.count().await, 0);
}

#[tokio::test]
async fn test_job_ids_snapshot_is_sorted() {
    let store = JobStore::new().await.unwrap();

    store
        .upsert("sleep_adkar_1", idle_job(&Trigger::EveryHours(1)))
        .await
        .unwrap();
    store
        .upsert(
            "evening_adkar_1",
            idle_job(&Trigger::DailyAt { hour: 17, minute: 15 }),
        )
        .await
        .unwrap();

    assert_eq!(
        store.job_ids().await,
        vec!["evening_adkar_1".to_string(), "sleep_adkar_1".to_string()]
    );

    store.remove("sleep_adkar_1").await.unwrap();
    assert!(!store.exists("sleep_adkar_1").await);
    assert_eq!(store.count().await, 1);
}
