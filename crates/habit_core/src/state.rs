use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::habit::Habit;
use crate::record::HabitRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub habits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub dark_mode: bool,
    pub week_start: u8,
    pub theme_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            week_start: 1,
            theme_color: "#3b82f6".to_string(),
        }
    }
}

/// The whole application state as one explicit value. The service owns
/// exactly one of these and persists it through the store on every
/// mutation; the engine modules only ever borrow it.
///
/// Every field defaults independently, so a document written by an older
/// build that lacks a top-level key still loads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppState {
    pub habits: Vec<Habit>,
    pub records: Vec<HabitRecord>,
    pub routines: Vec<Routine>,
    pub categories: Vec<Category>,
    pub settings: Settings,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            habits: Vec::new(),
            records: Vec::new(),
            routines: default_routines(),
            categories: Vec::new(),
            settings: Settings::default(),
        }
    }
}

fn default_routines() -> Vec<Routine> {
    vec![
        Routine {
            id: "morning".to_string(),
            name: "Morning Routine".to_string(),
            icon: "\u{1F305}".to_string(),
            start_time: None,
            habits: Vec::new(),
        },
        Routine {
            id: "evening".to_string(),
            name: "Evening Routine".to_string(),
            icon: "\u{1F319}".to_string(),
            start_time: None,
            habits: Vec::new(),
        },
    ]
}
