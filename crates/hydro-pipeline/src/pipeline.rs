use std::sync::Arc;

use tracing::{info, instrument};

use hydro_core::{HydroError, ReminderSchedule, Result};
use hydro_llm::GenerationProvider;

use crate::generator::{GenerationSettings, ScheduleGenerator};
use crate::goal::calculate_goal;
use crate::profiles::ProfileDirectory;

/// The end-to-end reminder pipeline: profile lookup → goal calculation →
/// schedule generation.
///
/// Collaborators are wired by explicit construction — there is no ambient
/// registry. The generation provider is optional at build time so that
/// offline commands can share the same pipeline object; a full run without
/// one fails with [`HydroError::CollaboratorUnavailable`] before any
/// external call is attempted.
pub struct ReminderPipeline {
    profiles: ProfileDirectory,
    generator: Option<ScheduleGenerator>,
}

impl ReminderPipeline {
    /// A pipeline with no generation collaborator. `goal_for` works;
    /// `run` fails fast.
    pub fn offline(profiles: ProfileDirectory) -> Self {
        Self {
            profiles,
            generator: None,
        }
    }

    pub fn new(
        profiles: ProfileDirectory,
        provider: Arc<dyn GenerationProvider>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            profiles,
            generator: Some(ScheduleGenerator::new(provider, settings)),
        }
    }

    /// Stage 1 + 2 only: resolve the profile and compute the goal.
    pub fn goal_for(&self, user_id: &str) -> Result<(hydro_core::UserProfile, hydro_core::WaterGoal)> {
        let profile = self.profiles.lookup(user_id)?;
        let goal = calculate_goal(&profile);
        Ok((profile, goal))
    }

    /// Run the full pipeline for one user.
    ///
    /// Stages execute unconditionally in fixed order; the first failure
    /// aborts the run with no compensation and no partial output.
    #[instrument(skip(self))]
    pub async fn run(&self, user_id: &str) -> Result<ReminderSchedule> {
        let (profile, goal) = self.goal_for(user_id)?;
        info!(
            user_id,
            daily_goal_ml = goal.daily_goal_ml,
            activity = %profile.activity_level,
            "goal calculated, generating schedule"
        );

        let generator = self.generator.as_ref().ok_or_else(|| {
            HydroError::CollaboratorUnavailable("no generation provider wired".into())
        })?;
        generator.generate(&profile, &goal).await
    }
}
