use tracing::debug;

use hydro_core::{UserProfile, WaterGoal};

/// Compute the daily water goal for a profile.
///
/// `base = weight_kg * 30`, plus the activity bonus for the profile's level,
/// rounded to the nearest multiple of 100 ml. Ties round up: 3250 → 3300.
/// Pure and deterministic — identical input always yields identical output.
pub fn calculate_goal(profile: &UserProfile) -> WaterGoal {
    let base_ml = profile.weight_kg * 30.0;
    let bonus_ml = profile.activity_level.bonus_ml();
    let raw_ml = base_ml + bonus_ml as f64;
    let daily_goal_ml = round_to_hundred(raw_ml);

    // Report the full delta between goal and base, so the rounding
    // adjustment is folded into the "added" amount the user sees.
    let added_ml = daily_goal_ml as f64 - base_ml;
    let reasoning = format!(
        "Based on your weight ({}kg) and {} activity level, your base intake is {:.0}ml. \
         An additional {:.0}ml was added for activity.",
        profile.weight_kg, profile.activity_level, base_ml, added_ml
    );

    debug!(
        user_id = %profile.user_id,
        base_ml,
        bonus_ml,
        daily_goal_ml,
        "calculated water goal"
    );

    WaterGoal {
        daily_goal_ml,
        reasoning,
    }
}

/// Round to the nearest multiple of 100, half-up. The source of the formula
/// left the tie direction unspecified; half-up is what we document and test.
fn round_to_hundred(ml: f64) -> u32 {
    ((ml / 100.0 + 0.5).floor() * 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_core::ActivityLevel;

    fn profile(weight_kg: f64, level: ActivityLevel) -> UserProfile {
        UserProfile::new("test-user", weight_kg, level, "UTC").unwrap()
    }

    #[test]
    fn test_reference_moderate_profile() {
        // 75kg moderate: base 2250 + 300 = 2550, rounds up to 2600.
        let goal = calculate_goal(&profile(75.0, ActivityLevel::Moderate));
        assert_eq!(goal.daily_goal_ml, 2600);
    }

    #[test]
    fn test_reference_athlete_profile() {
        // 75kg athlete: base 2250 + 1000 = 3250, tie rounds up to 3300.
        let goal = calculate_goal(&profile(75.0, ActivityLevel::Athlete));
        assert_eq!(goal.daily_goal_ml, 3300);
    }

    #[test]
    fn test_sedentary_no_bonus() {
        // 70kg sedentary: base 2100, already a multiple of 100.
        let goal = calculate_goal(&profile(70.0, ActivityLevel::Sedentary));
        assert_eq!(goal.daily_goal_ml, 2100);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to_hundred(3250.0), 3300);
        assert_eq!(round_to_hundred(3249.0), 3200);
        assert_eq!(round_to_hundred(2550.0), 2600);
        assert_eq!(round_to_hundred(2549.9), 2500);
        assert_eq!(round_to_hundred(2100.0), 2100);
    }

    #[test]
    fn test_goal_is_multiple_of_100() {
        for weight in [41.5, 55.0, 63.3, 75.0, 88.8, 102.0, 149.9] {
            for level in [
                ActivityLevel::Sedentary,
                ActivityLevel::Moderate,
                ActivityLevel::Active,
                ActivityLevel::Athlete,
            ] {
                let goal = calculate_goal(&profile(weight, level));
                assert_eq!(goal.daily_goal_ml % 100, 0, "weight={weight} level={level}");
                assert!(goal.daily_goal_ml > 0);
            }
        }
    }

    #[test]
    fn test_activity_monotonicity() {
        for weight in [50.0, 75.0, 99.5] {
            let sedentary = calculate_goal(&profile(weight, ActivityLevel::Sedentary));
            let moderate = calculate_goal(&profile(weight, ActivityLevel::Moderate));
            let active = calculate_goal(&profile(weight, ActivityLevel::Active));
            let athlete = calculate_goal(&profile(weight, ActivityLevel::Athlete));
            assert!(moderate.daily_goal_ml >= sedentary.daily_goal_ml);
            assert!(active.daily_goal_ml >= moderate.daily_goal_ml);
            assert!(athlete.daily_goal_ml >= active.daily_goal_ml);
        }
    }

    #[test]
    fn test_determinism() {
        let p = profile(82.4, ActivityLevel::Active);
        let first = calculate_goal(&p);
        for _ in 0..10 {
            let again = calculate_goal(&p);
            assert_eq!(again.daily_goal_ml, first.daily_goal_ml);
            assert_eq!(again.reasoning, first.reasoning);
        }
    }

    #[test]
    fn test_reasoning_mentions_base_and_added() {
        let goal = calculate_goal(&profile(75.0, ActivityLevel::Moderate));
        assert!(goal.reasoning.contains("2250ml"));
        assert!(goal.reasoning.contains("350ml")); // 2600 - 2250
        assert!(goal.reasoning.contains("moderate"));
    }
}
