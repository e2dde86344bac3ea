use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use hydro_config::{ConfigLoader, HydroConfig};
use hydro_core::{HydroError, ReminderSchedule, Result, WaterGoal};
use hydro_llm::AnthropicProvider;
use hydro_pipeline::{GenerationSettings, ProfileDirectory, ReminderPipeline};
use hydro_reminders::{ReminderScheduler, hydration_status};

/// 💧 hydro — personal hydration-coach agent
#[derive(Parser)]
#[command(name = "hydro", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to hydro.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and print the day's water schedule
    Plan {
        /// The user to plan for
        user_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute the daily water goal only (offline, no generation call)
    Goal {
        /// The user to compute for
        user_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the pipeline and deliver reminders until Ctrl-C
    Remind {
        /// The user to remind
        user_id: String,
    },
    /// Check hydration against the time of the last drink
    Check {
        /// RFC 3339 timestamp of the last water intake
        #[arg(long)]
        last_drink: String,
    },
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Initialize a new hydro.toml in the home config dir
    Init {
        /// Create in current directory instead of ~/.hydro/
        #[arg(long)]
        local: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // Load config first so we can use it for log format.
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();

        // Resolve log level: --verbose > --quiet > --log-level > config default.
        let log_level = if self.verbose {
            "debug".to_string()
        } else if self.quiet {
            "error".to_string()
        } else {
            self.log_level
                .clone()
                .unwrap_or_else(|| config.logging.level.clone())
        };

        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
        if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .json()
                .with_target(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }

        match self.command {
            Commands::Plan { user_id, json } => Self::cmd_plan(config, &user_id, json).await,
            Commands::Goal { user_id, json } => Self::cmd_goal(config, &user_id, json),
            Commands::Remind { user_id } => Self::cmd_remind(config, &user_id).await,
            Commands::Check { last_drink } => Self::cmd_check(&last_drink),
            Commands::Config { json } => Self::cmd_config(config, json),
            Commands::Init { local } => Self::cmd_init(local),
        }
    }

    fn build_directory(config: &HydroConfig) -> Result<ProfileDirectory> {
        let mut directory = ProfileDirectory::new();
        for profile_config in &config.profiles {
            directory.insert(profile_config.to_profile()?);
        }
        if directory.is_empty() {
            directory = ProfileDirectory::builtin();
        }
        Ok(directory)
    }

    /// Wire the pipeline by explicit construction: directory from config,
    /// Anthropic provider when a key is available, offline otherwise.
    fn build_pipeline(config: &HydroConfig) -> Result<ReminderPipeline> {
        let directory = Self::build_directory(config)?;

        let Some(api_key) = config.generation.api_key.clone() else {
            eprintln!("⚠️  No Anthropic API key found. Schedule generation needs one.");
            eprintln!("   In hydro.toml:  [generation]");
            eprintln!("                   api_key = \"sk-ant-...\"");
            eprintln!("   Or env var:     export ANTHROPIC_API_KEY=sk-ant-...");
            return Ok(ReminderPipeline::offline(directory));
        };

        let provider = AnthropicProvider::new(
            api_key,
            Duration::from_secs(config.generation.timeout_secs),
        )?;
        let settings = GenerationSettings {
            model: config.generation.model.clone(),
            max_tokens: config.generation.max_tokens,
            temperature: config.generation.temperature,
        };
        Ok(ReminderPipeline::new(
            directory,
            Arc::new(provider),
            settings,
        ))
    }

    async fn cmd_plan(config: HydroConfig, user_id: &str, json: bool) -> Result<()> {
        let pipeline = Self::build_pipeline(&config)?;
        let (_, goal) = pipeline.goal_for(user_id)?;
        let schedule = pipeline.run(user_id).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        } else {
            print_goal(&goal);
            println!();
            print_schedule(&schedule);
        }
        Ok(())
    }

    fn cmd_goal(config: HydroConfig, user_id: &str, json: bool) -> Result<()> {
        let directory = Self::build_directory(&config)?;
        let pipeline = ReminderPipeline::offline(directory);
        let (_, goal) = pipeline.goal_for(user_id)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&goal)?);
        } else {
            print_goal(&goal);
        }
        Ok(())
    }

    async fn cmd_remind(config: HydroConfig, user_id: &str) -> Result<()> {
        let pipeline = Self::build_pipeline(&config)?;
        let schedule = pipeline.run(user_id).await?;

        print_schedule(&schedule);
        println!();
        println!("⏰ Reminders armed — leave this running. Ctrl-C to stop.");

        let (scheduler, mut fired_rx) =
            ReminderScheduler::new(Duration::from_secs(config.reminders.poll_interval_secs));
        let handle = scheduler.handle();
        handle.load_schedule(&schedule).await?;
        tokio::spawn(scheduler.run());

        loop {
            tokio::select! {
                maybe_fired = fired_rx.recv() => {
                    match maybe_fired {
                        Some(fired) => {
                            let amount = fired
                                .amount_ml
                                .map(|ml| format!(" ({ml}ml)"))
                                .unwrap_or_default();
                            println!("💧 {}{}", fired.message, amount);
                        }
                        None => break,
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    println!("Stopped.");
                    break;
                }
            }
        }
        Ok(())
    }

    fn cmd_check(last_drink: &str) -> Result<()> {
        let last_drink: DateTime<Utc> = DateTime::parse_from_rfc3339(last_drink)
            .map_err(|e| HydroError::ToolExecution {
                tool: "hydration.check".into(),
                reason: format!(
                    "invalid --last-drink timestamp (use RFC 3339, e.g. 2025-10-25T16:40:00Z): {e}"
                ),
            })?
            .with_timezone(&Utc);

        println!("{}", hydration_status(last_drink, Utc::now()).message());
        Ok(())
    }

    fn cmd_config(config: HydroConfig, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            let toml_str = toml::to_string_pretty(&config)
                .map_err(|e| HydroError::Config(e.to_string()))?;
            println!("{toml_str}");
        }
        Ok(())
    }

    fn cmd_init(local: bool) -> Result<()> {
        let path = if local {
            PathBuf::from("hydro.toml")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".hydro")
                .join("hydro.toml")
        };
        ConfigLoader::write_starter(&path)?;
        println!("✅ Wrote starter config to {}", path.display());
        println!("   Add your Anthropic API key, then try: hydro plan user-123");
        Ok(())
    }
}

fn print_goal(goal: &WaterGoal) {
    println!("🎯 Daily goal: {}ml", goal.daily_goal_ml);
    println!("   {}", goal.reasoning);
}

fn print_schedule(schedule: &ReminderSchedule) {
    println!("📅 Today's schedule ({}ml total):", schedule.total_volume);
    for event in &schedule.schedule {
        println!("   {}  {:>4}ml  {}", event.time, event.amount_ml, event.message);
    }
}
