use thiserror::Error;

/// Unified error type for the hydro workspace.
#[derive(Error, Debug)]
pub enum HydroError {
    // ── Pipeline errors ────────────────────────────────────────
    #[error("no profile found for user: {0}")]
    ProfileNotFound(String),

    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("generation collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("malformed collaborator response: {0}")]
    MalformedResponse(String),

    #[error("schedule volume mismatch: goal is {expected}ml but events sum to {actual}ml")]
    VolumeMismatch { expected: u32, actual: u32 },

    // ── Provider errors ────────────────────────────────────────
    #[error("generation provider error: {0}")]
    Provider(String),

    #[error("generation provider rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Tool errors ────────────────────────────────────────────
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("tool execution failed: {tool}: {reason}")]
    ToolExecution { tool: String, reason: String },

    // ── Scheduler errors ───────────────────────────────────────
    #[error("scheduler error: {0}")]
    Scheduler(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HydroError>;
