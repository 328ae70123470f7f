use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Neutral,
    Bad,
}

/// One day's progress for one habit. At most one record exists per
/// (habit, date) pair; a date with no user action has no record at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HabitRecord {
    pub habit_id: String,
    pub date: NaiveDate,
    pub value: i64,
    #[serde(default)]
    pub is_skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

impl HabitRecord {
    /// Whether this record satisfies the given completion threshold.
    /// A skipped day is excused, never completed.
    pub fn meets(&self, target: i64) -> bool {
        !self.is_skipped && self.value >= target
    }
}

pub fn find_record<'a>(
    records: &'a [HabitRecord],
    habit_id: &str,
    date: NaiveDate,
) -> Option<&'a HabitRecord> {
    records
        .iter()
        .find(|record| record.habit_id == habit_id && record.date == date)
}

/// Writes progress for a day. Logging a value always clears any skip mark
/// on the same record.
pub fn upsert_record(records: &mut Vec<HabitRecord>, habit_id: &str, date: NaiveDate, value: i64) {
    if let Some(existing) = records
        .iter_mut()
        .find(|record| record.habit_id == habit_id && record.date == date)
    {
        existing.value = value;
        existing.is_skipped = false;
        return;
    }
    records.push(HabitRecord {
        habit_id: habit_id.to_string(),
        date,
        value,
        is_skipped: false,
        note: None,
        mood: None,
    });
}

/// Flips the excused marker for a day. Skipping zeroes out any logged
/// progress; un-skipping leaves the day at zero until progress is logged
/// again.
pub fn toggle_skip(records: &mut Vec<HabitRecord>, habit_id: &str, date: NaiveDate) {
    if let Some(existing) = records
        .iter_mut()
        .find(|record| record.habit_id == habit_id && record.date == date)
    {
        existing.is_skipped = !existing.is_skipped;
        existing.value = 0;
        return;
    }
    records.push(HabitRecord {
        habit_id: habit_id.to_string(),
        date,
        value: 0,
        is_skipped: true,
        note: None,
        mood: None,
    });
}

/// Cascade delete: removing a habit removes its whole history.
pub fn remove_for_habit(records: &mut Vec<HabitRecord>, habit_id: &str) {
    records.retain(|record| record.habit_id != habit_id);
}
