use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use hydro_core::{HydroError, Result, Tool, ToolCall, ToolExecutor, ToolResult};

use crate::hydration::hydration_status;
use crate::scheduler::SchedulerHandle;

/// The agent-callable tool surface: hydration checks and reminder scheduling.
///
/// Conversational behavior lives elsewhere; this only defines what a
/// tool-calling agent may invoke and how the calls map onto the scheduler.
pub struct ReminderToolkit {
    scheduler: SchedulerHandle,
}

impl ReminderToolkit {
    pub fn new(scheduler: SchedulerHandle) -> Self {
        Self { scheduler }
    }

    async fn check_hydration(&self, call: &ToolCall) -> Result<ToolResult> {
        let last_drink = call.arguments["lastDrinkTime"]
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc));

        let Some(last_drink) = last_drink else {
            return Ok(tool_error(
                call,
                "Invalid or missing lastDrinkTime. Use RFC 3339, e.g. 2025-10-25T16:40:00Z.",
            ));
        };

        let status = hydration_status(last_drink, Utc::now());
        debug!(?status, "hydration check");
        Ok(tool_ok(call, status.message()))
    }

    async fn schedule_reminder(&self, call: &ToolCall) -> Result<ToolResult> {
        let task = call.arguments["task"].as_str().unwrap_or("drink water");
        let Some(time) = call.arguments["time"].as_str() else {
            return Ok(tool_error(call, "Missing required argument: time."));
        };

        // An RFC 3339 instant schedules a one-shot; a bare HH:MM schedules
        // a daily reminder.
        if let Ok(fire_at) = DateTime::parse_from_rfc3339(time) {
            let fire_at = fire_at.with_timezone(&Utc);
            let id = self
                .scheduler
                .add_one_shot(fire_at, format!("Time to {task}!"), None)
                .await;
            return Ok(tool_ok(
                call,
                &format!("Reminder set for \"{task}\" at {fire_at} (id {id})."),
            ));
        }

        match parse_hhmm_lenient(time) {
            Some(minutes) => {
                let id = self
                    .scheduler
                    .add_daily(minutes, format!("Time to {task}!"), None, None)
                    .await?;
                Ok(tool_ok(
                    call,
                    &format!("Daily reminder set for \"{task}\" at {time} (id {id})."),
                ))
            }
            None => Ok(tool_error(
                call,
                "Invalid time format. Use RFC 3339 like 2025-10-25T16:40:00Z, or HH:MM for a daily reminder.",
            )),
        }
    }
}

#[async_trait]
impl ToolExecutor for ReminderToolkit {
    fn tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "hydration.check".into(),
                description: "Checks how long it has been since the user last drank water".into(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "lastDrinkTime": {
                            "type": "string",
                            "description": "RFC 3339 timestamp of the last water intake"
                        }
                    },
                    "required": ["lastDrinkTime"]
                }),
                is_mutating: false,
            },
            Tool {
                name: "reminder.schedule".into(),
                description: "Schedules a reminder for the user".into(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "task": {
                            "type": "string",
                            "description": "What the reminder is about"
                        },
                        "time": {
                            "type": "string",
                            "description": "When to remind: RFC 3339 for one-shot, HH:MM for daily"
                        }
                    },
                    "required": ["task", "time"]
                }),
                is_mutating: true,
            },
        ]
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        match call.tool_name.as_str() {
            "hydration.check" => self.check_hydration(call).await,
            "reminder.schedule" => self.schedule_reminder(call).await,
            other => Err(HydroError::ToolNotFound(other.to_string())),
        }
    }
}

fn tool_ok(call: &ToolCall, content: &str) -> ToolResult {
    ToolResult {
        tool_call_id: call.id.clone(),
        content: content.to_string(),
        is_error: false,
    }
}

fn tool_error(call: &ToolCall, content: &str) -> ToolResult {
    ToolResult {
        tool_call_id: call.id.clone(),
        content: content.to_string(),
        is_error: true,
    }
}

/// Accept "HH:MM" or "H:MM" clock times for daily reminders.
fn parse_hhmm_lenient(time: &str) -> Option<u16> {
    let (hh, mm) = time.split_once(':')?;
    let hours: u16 = hh.parse().ok()?;
    let minutes: u16 = mm.parse().ok()?;
    if hours > 23 || minutes > 59 || mm.len() != 2 {
        return None;
    }
    Some(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ReminderScheduler;
    use std::time::Duration;

    fn toolkit() -> ReminderToolkit {
        let (scheduler, _rx) = ReminderScheduler::new(Duration::from_secs(10));
        ReminderToolkit::new(scheduler.handle())
    }

    fn call(tool: &str, args: serde_json::Value) -> ToolCall {
        ToolCall {
            id: "call_1".into(),
            tool_name: tool.into(),
            arguments: args,
        }
    }

    #[tokio::test]
    async fn test_toolkit_lists_both_tools() {
        let names: Vec<String> = toolkit().tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["hydration.check", "reminder.schedule"]);
    }

    #[tokio::test]
    async fn test_hydration_check_old_timestamp() {
        let tk = toolkit();
        let old = (Utc::now() - chrono::Duration::hours(3)).to_rfc3339();
        let result = tk
            .execute(&call("hydration.check", json!({ "lastDrinkTime": old })))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(result.content, "Time to drink a glass of water!");
    }

    #[tokio::test]
    async fn test_hydration_check_bad_timestamp() {
        let tk = toolkit();
        let result = tk
            .execute(&call("hydration.check", json!({ "lastDrinkTime": "yesterday" })))
            .await
            .unwrap();
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn test_schedule_daily_reminder() {
        let tk = toolkit();
        let result = tk
            .execute(&call(
                "reminder.schedule",
                json!({ "task": "drink water", "time": "10:30" }),
            ))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert!(result.content.contains("10:30"));
    }

    #[tokio::test]
    async fn test_schedule_one_shot_reminder() {
        let tk = toolkit();
        let result = tk
            .execute(&call(
                "reminder.schedule",
                json!({ "task": "stretch", "time": "2025-10-25T16:40:00Z" }),
            ))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert!(result.content.contains("stretch"));
    }

    #[tokio::test]
    async fn test_schedule_invalid_time_is_soft_error() {
        let tk = toolkit();
        let result = tk
            .execute(&call(
                "reminder.schedule",
                json!({ "task": "drink", "time": "soon" }),
            ))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(result.content.contains("Invalid time format"));
    }

    #[tokio::test]
    async fn test_unknown_tool_errors() {
        let tk = toolkit();
        assert!(matches!(
            tk.execute(&call("browser.navigate", json!({}))).await,
            Err(HydroError::ToolNotFound(_))
        ));
    }
}
