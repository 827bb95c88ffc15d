//! API request structures

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::TimerError, state::TimerConfiguration};

const DEFAULT_TASK_LABEL: &str = "Reading";
const DEFAULT_PARENT_LABEL: &str = "Study";

/// Body of `POST /session`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartSessionRequest {
    /// Minutes, as a JSON number or a numeric string
    #[serde(default, alias = "totalTime")]
    pub total_time: Option<Value>,
    #[serde(default, alias = "taskName")]
    pub task_name: Option<String>,
    #[serde(default, alias = "targetTitle")]
    pub target_title: Option<String>,
}

impl StartSessionRequest {
    /// Build the timer configuration, filling in defaults for missing fields
    pub fn into_configuration(self, default_minutes: i64) -> Result<TimerConfiguration, TimerError> {
        let total_minutes = match &self.total_time {
            None | Some(Value::Null) => default_minutes,
            Some(raw) => parse_minutes(raw)?,
        };

        Ok(TimerConfiguration::new(
            total_minutes,
            self.task_name.unwrap_or_else(|| DEFAULT_TASK_LABEL.to_string()),
            self.target_title.unwrap_or_else(|| DEFAULT_PARENT_LABEL.to_string()),
        ))
    }
}

fn parse_minutes(raw: &Value) -> Result<i64, TimerError> {
    let minutes = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    minutes.ok_or_else(|| {
        TimerError::InvalidConfiguration(format!("duration is not a whole number of minutes: {}", raw))
    })
}
