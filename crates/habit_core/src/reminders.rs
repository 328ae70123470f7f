use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::habit::Habit;
use crate::record::{find_record, HabitRecord};
use crate::schedule::is_due;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReminderKind {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "NOTIFICATION")]
    Notification,
    #[serde(rename = "ALARM")]
    Alarm,
}

/// When a reminder applies: on every due day, on fixed weekdays, or ahead
/// of an upcoming occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "scheduleType")]
pub enum ReminderSchedule {
    #[serde(rename = "ALWAYS")]
    Always,
    #[serde(rename = "SPECIFIC_DAYS")]
    SpecificDays {
        #[serde(rename = "specificDays", default)]
        specific_days: Vec<u8>,
    },
    #[serde(rename = "DAYS_BEFORE")]
    DaysBefore {
        #[serde(rename = "daysBefore", default)]
        days_before: u32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub time: NaiveTime,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub is_enabled: bool,
    #[serde(flatten)]
    pub schedule: ReminderSchedule,
}

/// A reminder that should be surfaced to the user right now.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    pub habit_id: String,
    pub reminder_id: String,
    pub title: String,
    pub kind: ReminderKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Platform-specific reminder adapters (overlay, system notification,
/// alarm) implement this trait.
pub trait ReminderSink: Send + Sync {
    fn deliver(&self, request: ReminderRequest);
}

fn schedule_matches(habit: &Habit, schedule: &ReminderSchedule, date: NaiveDate) -> bool {
    match schedule {
        ReminderSchedule::Always => is_due(habit, date),
        ReminderSchedule::SpecificDays { specific_days } => {
            specific_days.contains(&(date.weekday().num_days_from_sunday() as u8))
        }
        ReminderSchedule::DaysBefore { days_before } => (1..=u64::from(*days_before)).any(|ahead| {
            date.checked_add_days(Days::new(ahead))
                .map_or(false, |upcoming| is_due(habit, upcoming))
        }),
    }
}

/// Evaluates which reminders are ripe at `date`/`now`. Pure; the caller's
/// polling timer invokes this repeatedly and deduplicates delivery itself
/// (the service layer keeps the per-day set).
///
/// A reminder is ripe when it is enabled and audible, its time of day has
/// passed, the habit has not already been completed for `date`, and its
/// schedule matches.
pub fn due_reminders(
    habits: &[Habit],
    records: &[HabitRecord],
    date: NaiveDate,
    now: NaiveTime,
) -> Vec<ReminderRequest> {
    let mut ripe = Vec::new();
    for habit in habits {
        if habit.is_archived || habit.is_paused {
            continue;
        }
        let completed = find_record(records, &habit.id, date)
            .map_or(false, |record| record.meets(habit.target()));
        if completed {
            continue;
        }
        for reminder in &habit.reminders {
            if !reminder.is_enabled || reminder.kind == ReminderKind::None {
                continue;
            }
            if reminder.time > now {
                continue;
            }
            if !schedule_matches(habit, &reminder.schedule, date) {
                continue;
            }
            ripe.push(ReminderRequest {
                habit_id: habit.id.clone(),
                reminder_id: reminder.id.clone(),
                title: habit.name.clone(),
                kind: reminder.kind,
                date,
                time: reminder.time,
            });
        }
    }
    ripe
}
