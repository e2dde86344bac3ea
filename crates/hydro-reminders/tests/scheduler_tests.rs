use std::time::Duration;

use chrono::Utc;
use hydro_core::{ReminderEvent, ReminderSchedule};
use hydro_reminders::{ReminderKind, ReminderScheduler};

fn sample_schedule() -> ReminderSchedule {
    let schedule: Vec<ReminderEvent> = [
        ("08:00", 500u32),
        ("10:30", 400),
        ("13:00", 500),
        ("15:30", 400),
        ("18:00", 450),
        ("21:00", 350),
    ]
    .iter()
    .map(|(time, amount_ml)| ReminderEvent {
        time: (*time).into(),
        amount_ml: *amount_ml,
        message: format!("Drink {amount_ml}ml now!"),
    })
    .collect();
    ReminderSchedule {
        schedule,
        total_volume: 2600,
    }
}

#[tokio::test]
async fn test_load_schedule_creates_daily_tasks() {
    let (scheduler, _rx) = ReminderScheduler::new(Duration::from_secs(10));
    let handle = scheduler.handle();

    let ids = handle.load_schedule(&sample_schedule()).await.unwrap();
    assert_eq!(ids.len(), 6);

    let tasks = handle.list().await;
    assert_eq!(tasks.len(), 6);
    assert!(tasks
        .iter()
        .all(|t| matches!(t.kind, ReminderKind::Daily { .. })));
    assert!(tasks.iter().all(|t| t.amount_ml.is_some()));
}

#[tokio::test]
async fn test_load_schedule_is_idempotent() {
    let (scheduler, _rx) = ReminderScheduler::new(Duration::from_secs(10));
    let handle = scheduler.handle();

    let first = handle.load_schedule(&sample_schedule()).await.unwrap();
    let second = handle.load_schedule(&sample_schedule()).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(handle.list().await.len(), 6);
}

#[tokio::test]
async fn test_one_shot_fires_and_deactivates() {
    let (scheduler, mut rx) = ReminderScheduler::new(Duration::from_millis(20));
    let handle = scheduler.handle();
    tokio::spawn(scheduler.run());

    // Already due: fires on the first poll.
    let id = handle
        .add_one_shot(
            Utc::now() - chrono::Duration::seconds(1),
            "Time to drink water!".into(),
            Some("now".into()),
        )
        .await;

    let fired = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("reminder did not fire in time")
        .expect("event channel closed");
    assert_eq!(fired.task_id, id);
    assert_eq!(fired.message, "Time to drink water!");

    // One-shots deactivate after firing.
    tokio::time::sleep(Duration::from_millis(60)).await;
    let task = handle.get(id).await.expect("task should still exist");
    assert!(!task.active);
    assert_eq!(task.fire_count, 1);
}

#[tokio::test]
async fn test_remove_reminder() {
    let (scheduler, _rx) = ReminderScheduler::new(Duration::from_secs(10));
    let handle = scheduler.handle();

    let id = handle
        .add_one_shot(Utc::now() + chrono::Duration::hours(1), "later".into(), None)
        .await;
    assert!(handle.remove(id).await);
    assert!(!handle.remove(id).await);
    assert!(handle.get(id).await.is_none());
}
