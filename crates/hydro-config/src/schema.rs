use serde::{Deserialize, Serialize};

use hydro_core::{ActivityLevel, Result, UserProfile};

/// Root configuration — maps to `hydro.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HydroConfig {
    pub generation: GenerationConfig,
    pub profiles: Vec<ProfileConfig>,
    pub reminders: RemindersConfig,
    pub logging: LoggingConfig,
}

impl Default for HydroConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            profiles: vec![ProfileConfig::demo()],
            reminders: RemindersConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ── Generation collaborator ────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Model identifier passed to the provider.
    pub model: String,
    /// Maximum tokens per response.
    pub max_tokens: u32,
    /// Temperature (0.0 - 2.0).
    pub temperature: f32,
    /// Wall-clock timeout for the single generation call, enforced at the
    /// provider boundary.
    pub timeout_secs: u64,
    /// Anthropic API key. Usually left unset here and supplied via
    /// the ANTHROPIC_API_KEY environment variable.
    pub api_key: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 2048,
            temperature: 0.7,
            timeout_secs: 60,
            api_key: None,
        }
    }
}

// ── Known users ────────────────────────────────────────────────

/// One user in the demo directory — the stand-in for a real user store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub user_id: String,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub timezone: String,
}

impl ProfileConfig {
    /// The user every fresh install knows about.
    pub fn demo() -> Self {
        Self {
            user_id: "user-123".into(),
            weight_kg: 75.0,
            activity_level: ActivityLevel::Moderate,
            timezone: "America/Los_Angeles".into(),
        }
    }

    /// Convert to a validated domain profile.
    pub fn to_profile(&self) -> Result<UserProfile> {
        UserProfile::new(
            self.user_id.clone(),
            self.weight_kg,
            self.activity_level,
            self.timezone.clone(),
        )
    }
}

// ── Reminders ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemindersConfig {
    /// How often the scheduler polls for due reminders, in seconds.
    pub poll_interval_secs: u64,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty", "json", "compact".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            WarningSeverity::Error => "❌",
            WarningSeverity::Warning => "⚠️ ",
        };
        write!(f, "{} {}: {}", icon, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {}", h)?;
        }
        Ok(())
    }
}

impl HydroConfig {
    /// Validate the config and return a list of warnings/errors.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> std::result::Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        if self.generation.model.is_empty() {
            warnings.push(ConfigWarning {
                field: "generation.model".into(),
                message: "model is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 'claude-sonnet-4-20250514'".into()),
            });
        }

        if self.generation.temperature < 0.0 || self.generation.temperature > 2.0 {
            warnings.push(ConfigWarning {
                field: "generation.temperature".into(),
                message: format!(
                    "temperature {} is out of range",
                    self.generation.temperature
                ),
                severity: WarningSeverity::Error,
                hint: Some("Temperature must be between 0.0 and 2.0".into()),
            });
        }

        if self.generation.max_tokens == 0 {
            warnings.push(ConfigWarning {
                field: "generation.max_tokens".into(),
                message: "max_tokens is 0 — the collaborator can't produce output".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 2048".into()),
            });
        }

        if self.reminders.poll_interval_secs == 0 {
            warnings.push(ConfigWarning {
                field: "reminders.poll_interval_secs".into(),
                message: "poll interval of 0 would spin the scheduler loop".into(),
                severity: WarningSeverity::Error,
                hint: Some("Use at least 1 second".into()),
            });
        }

        for (i, profile) in self.profiles.iter().enumerate() {
            if let Err(e) = profile.to_profile() {
                warnings.push(ConfigWarning {
                    field: format!("profiles[{i}]"),
                    message: e.to_string(),
                    severity: WarningSeverity::Error,
                    hint: None,
                });
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_levels.join(", "))),
            });
        }

        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| w.to_string())
            .collect();
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(errors.join("\n"))
        }
    }
}
