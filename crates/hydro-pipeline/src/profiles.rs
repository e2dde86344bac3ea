use std::collections::HashMap;

use tracing::debug;

use hydro_core::{ActivityLevel, HydroError, Result, UserProfile};

/// In-memory user directory — the stand-in for a real user-data store.
///
/// Profiles are registered at construction time (from config or the built-in
/// demo set); lookup of an unknown id is a hard failure that propagates
/// unchanged to the caller.
#[derive(Debug, Clone, Default)]
pub struct ProfileDirectory {
    profiles: HashMap<String, UserProfile>,
}

impl ProfileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo directory shipped with hydro.
    pub fn builtin() -> Self {
        let mut dir = Self::new();
        // UserProfile::new cannot fail for these literals.
        if let Ok(p) = UserProfile::new(
            "user-123",
            75.0,
            ActivityLevel::Moderate,
            "America/Los_Angeles",
        ) {
            dir.insert(p);
        }
        dir
    }

    /// Register a profile, replacing any existing entry for the same id.
    pub fn insert(&mut self, profile: UserProfile) {
        self.profiles.insert(profile.user_id.clone(), profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Resolve a user id to its profile.
    ///
    /// Errors with [`HydroError::ProfileNotFound`] for unknown ids and
    /// [`HydroError::InvalidProfile`] for an empty id.
    pub fn lookup(&self, user_id: &str) -> Result<UserProfile> {
        if user_id.trim().is_empty() {
            return Err(HydroError::InvalidProfile("user_id must be non-empty".into()));
        }
        match self.profiles.get(user_id) {
            Some(profile) => {
                debug!(user_id, weight_kg = profile.weight_kg, "resolved profile");
                Ok(profile.clone())
            }
            None => Err(HydroError::ProfileNotFound(user_id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_directory_has_demo_user() {
        let dir = ProfileDirectory::builtin();
        let profile = dir.lookup("user-123").unwrap();
        assert_eq!(profile.weight_kg, 75.0);
        assert_eq!(profile.activity_level, ActivityLevel::Moderate);
        assert_eq!(profile.timezone, "America/Los_Angeles");
    }

    #[test]
    fn test_unknown_user_is_not_found() {
        let dir = ProfileDirectory::builtin();
        match dir.lookup("unknown-user") {
            Err(HydroError::ProfileNotFound(id)) => assert_eq!(id, "unknown-user"),
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_user_id_rejected() {
        let dir = ProfileDirectory::builtin();
        assert!(matches!(
            dir.lookup("  "),
            Err(HydroError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut dir = ProfileDirectory::builtin();
        let updated =
            UserProfile::new("user-123", 80.0, ActivityLevel::Active, "Europe/Oslo").unwrap();
        dir.insert(updated);
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.lookup("user-123").unwrap().weight_kg, 80.0);
    }
}
