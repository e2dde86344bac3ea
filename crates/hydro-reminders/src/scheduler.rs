//! # Reminder scheduler
//!
//! Keeps the day's drinking reminders in an in-memory task table and emits a
//! [`ReminderFired`] event over an mpsc channel when one comes due. Daily
//! reminders are cron-backed (an expression derived from the event's `HH:MM`
//! time); one-shot reminders fire once at a fixed instant and deactivate.
//!
//! Delivery is someone else's job: consumers of the event channel decide
//! whether a fired reminder becomes a terminal line, a push, or a popup.

use chrono::{DateTime, Utc};
use cron::Schedule;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex as TokioMutex, mpsc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use hydro_core::{HydroError, ReminderSchedule, Result};

/// A scheduled reminder — daily (cron) or one-shot.
#[derive(Debug, Clone)]
pub struct ReminderTask {
    pub id: Uuid,
    /// Human-readable label, used for deduplication on re-load.
    pub label: Option<String>,
    /// The message delivered when the reminder fires.
    pub message: String,
    /// How much to drink, when the reminder came from a schedule event.
    pub amount_ml: Option<u32>,
    pub kind: ReminderKind,
    pub created_at: DateTime<Utc>,
    pub active: bool,
    pub fire_count: u64,
    pub last_fired: Option<DateTime<Utc>>,
}

/// The kind of schedule: recurring daily or one-shot.
#[derive(Debug, Clone)]
pub enum ReminderKind {
    /// Fires every day on a cron expression.
    Daily { expression: String },
    /// Fires once at the specified instant.
    OneShot { fire_at: DateTime<Utc> },
}

/// Emitted when a reminder comes due.
#[derive(Debug, Clone)]
pub struct ReminderFired {
    pub task_id: Uuid,
    pub message: String,
    pub amount_ml: Option<u32>,
    pub label: Option<String>,
}

/// Build the cron expression for "every day at HH:MM" from minutes past
/// midnight (sec min hour dom month dow).
fn daily_expression(minutes_of_day: u16) -> String {
    format!("0 {} {} * * *", minutes_of_day % 60, minutes_of_day / 60)
}

/// The reminder scheduler: a polling loop over a shared task table.
pub struct ReminderScheduler {
    tasks: Arc<TokioMutex<HashMap<Uuid, ReminderTask>>>,
    event_tx: mpsc::Sender<ReminderFired>,
    poll_interval: Duration,
}

impl ReminderScheduler {
    /// Create a scheduler. Returns the scheduler and the receiver for fired
    /// reminders.
    pub fn new(poll_interval: Duration) -> (Self, mpsc::Receiver<ReminderFired>) {
        let (event_tx, event_rx) = mpsc::channel(64);
        let scheduler = Self {
            tasks: Arc::new(TokioMutex::new(HashMap::new())),
            event_tx,
            poll_interval,
        };
        (scheduler, event_rx)
    }

    /// Get a handle for adding/removing tasks from other async contexts.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            tasks: self.tasks.clone(),
        }
    }

    /// Run the scheduler loop. Spawn this as a background task.
    pub async fn run(self) {
        info!(interval_secs = self.poll_interval.as_secs(), "reminder scheduler started");

        loop {
            tokio::time::sleep(self.poll_interval).await;

            let now = Utc::now();
            let mut tasks = self.tasks.lock().await;
            let mut to_deactivate: Vec<Uuid> = Vec::new();

            for task in tasks.values_mut() {
                if !task.active {
                    continue;
                }

                let should_fire = match &task.kind {
                    ReminderKind::Daily { expression } => match Schedule::from_str(expression) {
                        Ok(schedule) => {
                            let since = task.last_fired.unwrap_or(task.created_at);
                            schedule
                                .after(&since)
                                .take(1)
                                .next()
                                .is_some_and(|next| next <= now)
                        }
                        Err(e) => {
                            warn!(task_id = %task.id, error = %e, "invalid cron expression, deactivating");
                            to_deactivate.push(task.id);
                            false
                        }
                    },
                    ReminderKind::OneShot { fire_at } => now >= *fire_at,
                };

                if should_fire {
                    debug!(task_id = %task.id, label = ?task.label, "reminder firing");

                    let event = ReminderFired {
                        task_id: task.id,
                        message: task.message.clone(),
                        amount_ml: task.amount_ml,
                        label: task.label.clone(),
                    };

                    if self.event_tx.send(event).await.is_err() {
                        warn!("reminder event channel closed, shutting down scheduler");
                        return;
                    }

                    task.fire_count += 1;
                    task.last_fired = Some(now);

                    if matches!(task.kind, ReminderKind::OneShot { .. }) {
                        to_deactivate.push(task.id);
                    }
                }
            }

            for id in to_deactivate {
                if let Some(task) = tasks.get_mut(&id) {
                    task.active = false;
                    debug!(task_id = %id, "deactivated reminder");
                }
            }
        }
    }
}

/// A clone-able handle for managing reminders from other async contexts.
#[derive(Clone)]
pub struct SchedulerHandle {
    tasks: Arc<TokioMutex<HashMap<Uuid, ReminderTask>>>,
}

impl SchedulerHandle {
    /// Add a daily reminder at `minutes_of_day` past midnight.
    ///
    /// Deduplicates by label: if an active task carries the same label, the
    /// existing id is returned instead of creating a duplicate.
    pub async fn add_daily(
        &self,
        minutes_of_day: u16,
        message: String,
        amount_ml: Option<u32>,
        label: Option<String>,
    ) -> Result<Uuid> {
        let expression = daily_expression(minutes_of_day);
        Schedule::from_str(&expression)
            .map_err(|e| HydroError::Scheduler(format!("invalid cron expression: {e}")))?;

        let mut tasks = self.tasks.lock().await;

        if let Some(ref new_label) = label {
            for existing in tasks.values() {
                if existing.active && existing.label.as_ref() == Some(new_label) {
                    info!(task_id = %existing.id, label = %new_label, "reminder already scheduled, skipping");
                    return Ok(existing.id);
                }
            }
        }

        let task = ReminderTask {
            id: Uuid::new_v4(),
            label,
            message,
            amount_ml,
            kind: ReminderKind::Daily { expression },
            created_at: Utc::now(),
            active: true,
            fire_count: 0,
            last_fired: None,
        };

        let id = task.id;
        info!(task_id = %id, minutes_of_day, "scheduled daily reminder");
        tasks.insert(id, task);
        Ok(id)
    }

    /// Add a one-shot reminder at a fixed instant.
    pub async fn add_one_shot(
        &self,
        fire_at: DateTime<Utc>,
        message: String,
        label: Option<String>,
    ) -> Uuid {
        let task = ReminderTask {
            id: Uuid::new_v4(),
            label,
            message,
            amount_ml: None,
            kind: ReminderKind::OneShot { fire_at },
            created_at: Utc::now(),
            active: true,
            fire_count: 0,
            last_fired: None,
        };

        let id = task.id;
        info!(task_id = %id, fire_at = %fire_at, "scheduled one-shot reminder");
        self.tasks.lock().await.insert(id, task);
        id
    }

    /// Load every event of a validated schedule as a daily reminder.
    /// Labels are derived from the event time, so re-loading the same
    /// schedule is idempotent.
    pub async fn load_schedule(&self, schedule: &ReminderSchedule) -> Result<Vec<Uuid>> {
        let mut ids = Vec::with_capacity(schedule.schedule.len());
        for event in &schedule.schedule {
            let minutes = event.minutes_of_day()?;
            let id = self
                .add_daily(
                    minutes,
                    event.message.clone(),
                    Some(event.amount_ml),
                    Some(format!("water-{}", event.time)),
                )
                .await?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Remove a reminder.
    pub async fn remove(&self, task_id: Uuid) -> bool {
        self.tasks.lock().await.remove(&task_id).is_some()
    }

    /// Get a reminder by id.
    pub async fn get(&self, task_id: Uuid) -> Option<ReminderTask> {
        self.tasks.lock().await.get(&task_id).cloned()
    }

    /// List all active reminders.
    pub async fn list(&self) -> Vec<ReminderTask> {
        self.tasks
            .lock()
            .await
            .values()
            .filter(|t| t.active)
            .cloned()
            .collect()
    }
}
