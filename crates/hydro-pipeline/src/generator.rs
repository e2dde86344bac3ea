use std::sync::Arc;

use tracing::{debug, info};

use hydro_core::{HydroError, ReminderSchedule, Result, UserProfile, WaterGoal};
use hydro_llm::{GenerationProvider, GenerationRequest};

/// Knobs for the single generation call, usually filled from config.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}

const SYSTEM_PROMPT: &str = "You are a hydration coach. Respond with a single JSON object \
and nothing else: no prose, no markdown fences. The object has two keys: \"schedule\", an \
array of {\"time\": \"HH:MM\", \"amountMl\": integer, \"message\": string} entries in \
chronological order, and \"totalVolume\", the integer sum of all amountMl values.";

/// Turns a profile + goal into a validated day of reminders by asking the
/// generation collaborator to distribute the goal volume over the day.
///
/// Exactly one provider call per invocation: no retry, no streaming, no
/// repair round-trip. Anything the collaborator returns is re-validated
/// before it is accepted.
pub struct ScheduleGenerator {
    provider: Arc<dyn GenerationProvider>,
    settings: GenerationSettings,
}

impl ScheduleGenerator {
    pub fn new(provider: Arc<dyn GenerationProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    pub async fn generate(
        &self,
        profile: &UserProfile,
        goal: &WaterGoal,
    ) -> Result<ReminderSchedule> {
        let prompt = build_prompt(profile, goal);
        debug!(provider = self.provider.name(), "requesting reminder schedule");

        let request = GenerationRequest {
            model: self.settings.model.clone(),
            prompt,
            system: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };
        let response = self.provider.complete(&request).await?;

        let schedule = parse_schedule(&response.text)?;
        schedule.validate_structure()?;
        schedule.check_volume(goal.daily_goal_ml)?;

        info!(
            events = schedule.schedule.len(),
            total_volume = schedule.total_volume,
            tokens = response.usage.total_tokens(),
            "accepted generated schedule"
        );
        Ok(schedule)
    }
}

/// Build the natural-language instruction for the collaborator, embedding the
/// goal and the distribution constraints.
fn build_prompt(profile: &UserProfile, goal: &WaterGoal) -> String {
    format!(
        "Create a detailed, personalized water intake schedule for a user with the \
following profile:\n\
- Daily Water Goal: {goal_ml}ml\n\
- Weight: {weight}kg\n\
- Activity Level: {level}\n\
- Timezone: {tz}\n\
Guidelines:\n\
1. Distribute the total daily goal ({goal_ml}ml) into 5 to 8 separate drinking events.\n\
2. Reminders should start at 08:00 or later and end by 22:00 in the user's timezone, \
with strictly increasing times.\n\
3. Larger amounts should be suggested after the main morning and afternoon activity periods.\n\
4. The total volume must equal exactly {goal_ml}.\n\
5. Messages should be encouraging and personalized.",
        goal_ml = goal.daily_goal_ml,
        weight = profile.weight_kg,
        level = profile.activity_level,
        tz = profile.timezone,
    )
}

/// Parse the collaborator's text as a [`ReminderSchedule`].
///
/// Tolerates a markdown code fence around the JSON (a common LLM habit even
/// when told not to), but nothing else: any deserialization failure is a
/// [`HydroError::MalformedResponse`].
fn parse_schedule(text: &str) -> Result<ReminderSchedule> {
    let json = strip_code_fence(text);
    serde_json::from_str(json)
        .map_err(|e| HydroError::MalformedResponse(format!("not a valid schedule JSON: {e}")))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_core::ActivityLevel;

    fn fixture() -> (UserProfile, WaterGoal) {
        let profile = UserProfile::new(
            "user-123",
            75.0,
            ActivityLevel::Moderate,
            "America/Los_Angeles",
        )
        .unwrap();
        let goal = crate::goal::calculate_goal(&profile);
        (profile, goal)
    }

    #[test]
    fn test_prompt_embeds_goal_and_constraints() {
        let (profile, goal) = fixture();
        let prompt = build_prompt(&profile, &goal);
        assert!(prompt.contains("2600ml"));
        assert!(prompt.contains("75kg"));
        assert!(prompt.contains("moderate"));
        assert!(prompt.contains("America/Los_Angeles"));
        assert!(prompt.contains("5 to 8"));
        assert!(prompt.contains("08:00"));
        assert!(prompt.contains("22:00"));
        assert!(prompt.contains("must equal exactly 2600"));
    }

    #[test]
    fn test_parse_plain_json() {
        let text = r#"{"schedule": [{"time": "08:00", "amountMl": 400, "message": "go"}], "totalVolume": 400}"#;
        let schedule = parse_schedule(text).unwrap();
        assert_eq!(schedule.schedule.len(), 1);
        assert_eq!(schedule.total_volume, 400);
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "```json\n{\"schedule\": [], \"totalVolume\": 0}\n```";
        let schedule = parse_schedule(text).unwrap();
        assert!(schedule.schedule.is_empty());
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        assert!(matches!(
            parse_schedule("I'd be happy to help you stay hydrated!"),
            Err(HydroError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_missing_field_is_malformed() {
        // totalVolume absent
        let text = r#"{"schedule": [{"time": "08:00", "amountMl": 400, "message": "go"}]}"#;
        assert!(matches!(
            parse_schedule(text),
            Err(HydroError::MalformedResponse(_))
        ));
    }
}
