//! # hydro-cli
//!
//! Command-line interface for the hydro hydration agent.
//!
//! ## Commands
//!
//! - `hydro plan` — Run the full pipeline and print the day's schedule
//! - `hydro goal` — Compute the daily water goal (offline, no provider)
//! - `hydro remind` — Run the pipeline and deliver reminders until Ctrl-C
//! - `hydro check` — Check hydration against the last drink time
//! - `hydro config` — Show the effective configuration
//! - `hydro init` — Write a starter hydro.toml

pub mod commands;

pub use commands::Cli;
