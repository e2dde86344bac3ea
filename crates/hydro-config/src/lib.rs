//! # hydro-config
//!
//! Configuration system for hydro. Reads from `hydro.toml`, environment
//! variables, and CLI overrides — in that precedence order.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::HydroConfig;
pub use schema::{ConfigWarning, WarningSeverity};
