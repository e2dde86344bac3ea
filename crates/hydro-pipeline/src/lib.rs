//! # hydro-pipeline
//!
//! The core of hydro: a strictly sequential three-stage pipeline that turns a
//! user id into a personalized day of water reminders.
//!
//! 1. **Profile lookup** (`profiles`) — resolve the id to a physiological profile
//! 2. **Goal calculation** (`goal`) — pure arithmetic: profile → daily goal in ml
//! 3. **Schedule generation** (`generator`) — one call to the generation
//!    collaborator, then strict validation of what came back
//!
//! There is no fan-out, no retry, and no shared state between runs. Any stage
//! failure aborts the run; a failed run never yields a partial schedule.
//!
//! # Safety principle
//!
//! The LLM only distributes volume over the day. It never decides the goal —
//! that is deterministic arithmetic — and nothing it returns is accepted
//! without structural and volume validation.

pub mod generator;
pub mod goal;
pub mod pipeline;
pub mod profiles;

pub use generator::{GenerationSettings, ScheduleGenerator};
pub use goal::calculate_goal;
pub use pipeline::ReminderPipeline;
pub use profiles::ProfileDirectory;
