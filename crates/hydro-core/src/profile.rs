use serde::{Deserialize, Serialize};

use crate::error::{HydroError, Result};

/// How physically active a user is. Drives the activity bonus added on top
/// of the weight-based baseline intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
    Athlete,
}

impl ActivityLevel {
    /// Fixed extra milliliters added to the baseline for this level.
    pub fn bonus_ml(self) -> u32 {
        match self {
            ActivityLevel::Sedentary => 0,
            ActivityLevel::Moderate => 300,
            ActivityLevel::Active => 600,
            ActivityLevel::Athlete => 1000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::Athlete => "athlete",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = HydroError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "athlete" => Ok(ActivityLevel::Athlete),
            other => Err(HydroError::InvalidProfile(format!(
                "unknown activity level '{other}' (expected sedentary, moderate, active, or athlete)"
            ))),
        }
    }
}

/// Physiological profile of a user, resolved once per pipeline run.
///
/// Immutable after construction. The timezone is an IANA name used only as
/// generation guidance for the schedule — nothing in the pipeline computes
/// against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub timezone: String,
}

impl UserProfile {
    /// Build a profile, enforcing the field invariants up front so the
    /// downstream stages never have to re-check them.
    pub fn new(
        user_id: impl Into<String>,
        weight_kg: f64,
        activity_level: ActivityLevel,
        timezone: impl Into<String>,
    ) -> Result<Self> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(HydroError::InvalidProfile("user_id must be non-empty".into()));
        }
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(HydroError::InvalidProfile(format!(
                "weight_kg must be positive, got {weight_kg}"
            )));
        }
        Ok(Self {
            user_id,
            weight_kg,
            activity_level,
            timezone: timezone.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_activity_bonus_values() {
        assert_eq!(ActivityLevel::Sedentary.bonus_ml(), 0);
        assert_eq!(ActivityLevel::Moderate.bonus_ml(), 300);
        assert_eq!(ActivityLevel::Active.bonus_ml(), 600);
        assert_eq!(ActivityLevel::Athlete.bonus_ml(), 1000);
    }

    #[test]
    fn test_activity_level_parse() {
        assert_eq!(
            ActivityLevel::from_str("moderate").unwrap(),
            ActivityLevel::Moderate
        );
        assert!(ActivityLevel::from_str("couch").is_err());
    }

    #[test]
    fn test_profile_rejects_empty_user_id() {
        let result = UserProfile::new("", 75.0, ActivityLevel::Moderate, "UTC");
        assert!(matches!(result, Err(HydroError::InvalidProfile(_))));
    }

    #[test]
    fn test_profile_rejects_nonpositive_weight() {
        assert!(UserProfile::new("u", 0.0, ActivityLevel::Moderate, "UTC").is_err());
        assert!(UserProfile::new("u", -3.0, ActivityLevel::Moderate, "UTC").is_err());
        assert!(UserProfile::new("u", f64::NAN, ActivityLevel::Moderate, "UTC").is_err());
    }

    #[test]
    fn test_profile_serde_lowercase_activity() {
        let profile = UserProfile::new("u", 75.0, ActivityLevel::Athlete, "UTC").unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["activity_level"], "athlete");
    }
}
