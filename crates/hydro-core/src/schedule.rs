use serde::{Deserialize, Serialize};

use crate::error::{HydroError, Result};

/// Earliest minute of the day a reminder may fire (08:00).
pub const WINDOW_START_MIN: u16 = 8 * 60;
/// Latest minute of the day a reminder may fire (22:00).
pub const WINDOW_END_MIN: u16 = 22 * 60;
/// Minimum number of drinking events in an accepted schedule.
pub const MIN_EVENTS: usize = 5;
/// Maximum number of drinking events in an accepted schedule.
pub const MAX_EVENTS: usize = 8;

/// Daily water-intake goal derived purely from a [`UserProfile`].
///
/// `daily_goal_ml` is always a positive multiple of 100. `reasoning` is
/// descriptive text for the user and is never parsed downstream.
///
/// [`UserProfile`]: crate::profile::UserProfile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterGoal {
    pub daily_goal_ml: u32,
    pub reasoning: String,
}

/// A single reminder: when to drink, how much, and what to say.
///
/// Serialized camelCase: this is the wire shape the generation collaborator
/// is asked to produce and the shape the entry point returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderEvent {
    /// Wall-clock time in `HH:MM` 24-hour format, interpreted in the
    /// profile's timezone.
    pub time: String,
    pub amount_ml: u32,
    pub message: String,
}

impl ReminderEvent {
    /// Parse `time` as minutes since midnight.
    pub fn minutes_of_day(&self) -> Result<u16> {
        parse_hhmm(&self.time)
    }
}

/// A full day of reminders, in chronological delivery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSchedule {
    pub schedule: Vec<ReminderEvent>,
    /// Declared sum of all event amounts. Checked, never trusted.
    pub total_volume: u32,
}

impl ReminderSchedule {
    /// Sum of `amount_ml` across all events.
    pub fn event_sum(&self) -> u32 {
        self.schedule.iter().map(|e| e.amount_ml).sum()
    }

    /// Structural validation of a schedule received from a generation
    /// collaborator: event count in [5, 8], every time well-formed and
    /// inside the 08:00–22:00 window, times strictly increasing, amounts
    /// positive, and the declared `total_volume` consistent with the
    /// actual event sum.
    ///
    /// Any violation is a [`HydroError::MalformedResponse`]. Comparing the
    /// volume against a goal is a separate concern, see
    /// [`ReminderSchedule::check_volume`].
    pub fn validate_structure(&self) -> Result<()> {
        let count = self.schedule.len();
        if !(MIN_EVENTS..=MAX_EVENTS).contains(&count) {
            return Err(HydroError::MalformedResponse(format!(
                "expected {MIN_EVENTS}-{MAX_EVENTS} events, got {count}"
            )));
        }

        let mut prev: Option<u16> = None;
        for event in &self.schedule {
            let minutes = event.minutes_of_day()?;
            if !(WINDOW_START_MIN..=WINDOW_END_MIN).contains(&minutes) {
                return Err(HydroError::MalformedResponse(format!(
                    "event time {} is outside the 08:00-22:00 window",
                    event.time
                )));
            }
            if let Some(p) = prev {
                if minutes <= p {
                    return Err(HydroError::MalformedResponse(format!(
                        "event times must be strictly increasing, {} does not follow",
                        event.time
                    )));
                }
            }
            prev = Some(minutes);

            if event.amount_ml == 0 {
                return Err(HydroError::MalformedResponse(format!(
                    "event at {} has zero amount_ml",
                    event.time
                )));
            }
        }

        let sum = self.event_sum();
        if sum != self.total_volume {
            return Err(HydroError::MalformedResponse(format!(
                "declared total_volume {} does not match event sum {}",
                self.total_volume, sum
            )));
        }

        Ok(())
    }

    /// Check that the schedule distributes exactly the goal volume.
    /// Strict equality, no tolerance.
    pub fn check_volume(&self, daily_goal_ml: u32) -> Result<()> {
        let actual = self.event_sum();
        if actual != daily_goal_ml {
            return Err(HydroError::VolumeMismatch {
                expected: daily_goal_ml,
                actual,
            });
        }
        Ok(())
    }
}

/// Parse a strict `HH:MM` 24-hour time into minutes since midnight.
fn parse_hhmm(time: &str) -> Result<u16> {
    fn malformed(time: &str) -> HydroError {
        HydroError::MalformedResponse(format!("invalid HH:MM time string: '{time}'"))
    }

    let Some((hh, mm)) = time.split_once(':') else {
        return Err(malformed(time));
    };
    if hh.len() != 2 || mm.len() != 2 {
        return Err(malformed(time));
    }
    let hours: u16 = hh.parse().map_err(|_| malformed(time))?;
    let minutes: u16 = mm.parse().map_err(|_| malformed(time))?;
    if hours > 23 || minutes > 59 {
        return Err(malformed(time));
    }
    Ok(hours * 60 + minutes)
}
