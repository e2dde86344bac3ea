use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::schema::HydroConfig;
use hydro_core::{HydroError, Result};

/// Loads the hydro configuration from disk with env-var overrides.
pub struct ConfigLoader {
    config: HydroConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > HYDRO_CONFIG env > ~/.hydro/hydro.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("HYDRO_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hydro")
            .join("hydro.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<HydroConfig>(&raw).map_err(|e| {
                HydroError::Config(format!("failed to parse {}: {}", config_path.display(), e))
            })?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            HydroConfig::default()
        };

        let config = Self::apply_env_overrides(config);

        // Validate — log warnings, fail on errors.
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(HydroError::Config(e));
            }
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// The effective configuration.
    pub fn get(&self) -> HydroConfig {
        self.config.clone()
    }

    /// Path the config was (or would have been) read from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (HYDRO_MODEL, HYDRO_LOG_LEVEL, ...).
    fn apply_env_overrides(mut config: HydroConfig) -> HydroConfig {
        if let Ok(v) = std::env::var("HYDRO_MODEL") {
            config.generation.model = v;
        }
        if let Ok(v) = std::env::var("HYDRO_LOG_LEVEL") {
            config.logging.level = v;
        }
        // API key: env var fills in when the config file doesn't set one.
        // The file takes priority, env is the fallback.
        if config.generation.api_key.is_none() {
            if let Ok(v) = std::env::var("ANTHROPIC_API_KEY") {
                config.generation.api_key = Some(v);
            }
        }
        config
    }

    /// Write a starter config file, refusing to clobber an existing one.
    pub fn write_starter(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(HydroError::Config(format!(
                "config file already exists: {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let starter = toml::to_string_pretty(&HydroConfig::default())
            .map_err(|e| HydroError::Config(format!("failed to serialize defaults: {e}")))?;
        std::fs::write(path, starter)?;
        info!(?path, "wrote starter configuration");
        Ok(())
    }
}
