use chrono::{DateTime, Utc};

/// Hours without water after which we nudge the user.
const THIRSTY_AFTER_HOURS: f64 = 2.0;

/// Outcome of a hydration check.
#[derive(Debug, Clone, PartialEq)]
pub enum HydrationStatus {
    /// Two or more hours since the last drink.
    TimeToDrink { hours_since: f64 },
    WellHydrated,
}

impl HydrationStatus {
    /// The user-facing message for this status.
    pub fn message(&self) -> &'static str {
        match self {
            HydrationStatus::TimeToDrink { .. } => "Time to drink a glass of water!",
            HydrationStatus::WellHydrated => "You're well hydrated!",
        }
    }
}

/// Check how the user is doing against the 2-hour drinking cadence.
/// Pure over the two instants, so tests pin `now`.
pub fn hydration_status(last_drink: DateTime<Utc>, now: DateTime<Utc>) -> HydrationStatus {
    let hours_since = (now - last_drink).num_seconds() as f64 / 3600.0;
    if hours_since >= THIRSTY_AFTER_HOURS {
        HydrationStatus::TimeToDrink { hours_since }
    } else {
        HydrationStatus::WellHydrated
    }
}
