//! # hydro-reminders
//!
//! Delivery-side scaffolding around the pipeline: an in-process reminder
//! scheduler and the two agent-callable tools (hydration check, reminder
//! scheduling). Actual desktop/notification delivery is left to whatever
//! consumes the fired events.

pub mod hydration;
pub mod scheduler;
pub mod tools;

pub use hydration::{HydrationStatus, hydration_status};
pub use scheduler::{ReminderFired, ReminderKind, ReminderScheduler, ReminderTask, SchedulerHandle};
pub use tools::ReminderToolkit;
