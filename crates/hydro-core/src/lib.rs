//! # hydro-core
//!
//! Core types, traits, and primitives for the hydro hydration agent.
//! This crate defines the shared vocabulary used by every other crate in the workspace.

pub mod error;
pub mod profile;
pub mod schedule;
pub mod tool;

pub use error::{HydroError, Result};
pub use profile::{ActivityLevel, UserProfile};
pub use schedule::{ReminderEvent, ReminderSchedule, WaterGoal};
pub use tool::{Tool, ToolCall, ToolExecutor, ToolResult};
