use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::reminders::Reminder;

/// How a record's numeric value is read for this habit: 1 for a binary
/// check-off, repetitions for counts, seconds for timed work, completed
/// sessions for Pomodoro.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HabitKind {
    #[serde(rename = "YES_NO")]
    YesNo,
    #[serde(rename = "COUNT")]
    Count,
    #[serde(rename = "TIME")]
    Time,
    #[serde(rename = "POMODORO")]
    Pomodoro,
}

/// Recurrence rule. Weekdays are numbered 0 = Sunday through 6 = Saturday.
///
/// A discriminant we do not recognize decodes as `Unknown` instead of
/// failing, so one odd habit cannot poison a whole stored collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Frequency {
    #[serde(rename = "DAILY")]
    Daily,
    #[serde(rename = "WEEKDAYS")]
    Weekdays {
        #[serde(default)]
        weekdays: Vec<u8>,
    },
    #[serde(rename = "INTERVAL")]
    Interval {
        #[serde(default)]
        interval: u32,
    },
    #[serde(rename = "MONTHLY")]
    Monthly {
        #[serde(rename = "monthlyDays", default)]
        monthly_days: Vec<u8>,
    },
    #[serde(other, rename = "UNKNOWN")]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroConfig {
    pub work_duration: u32,
    pub break_duration: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: HabitKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub target_value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub frequency: Frequency,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_paused: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pomodoro_config: Option<PomodoroConfig>,
}

impl Habit {
    /// Effective completion threshold; binary habits always target 1.
    pub fn target(&self) -> i64 {
        match self.kind {
            HabitKind::YesNo => 1,
            _ => self.target_value,
        }
    }
}
