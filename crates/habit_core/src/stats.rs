use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::habit::Habit;
use crate::record::{find_record, HabitRecord};
use crate::schedule::is_due;
use crate::streak::{compute_streak, Streak};

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DailyStats {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub active_count: usize,
    pub best_streak: u32,
    pub active_streak: u32,
    pub week_percentage: u32,
    pub total_completions: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HabitStreak {
    pub habit_id: String,
    pub streak: Streak,
}

/// Calendar cell classification for one day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Missed,
    Partial,
    Full,
    Skipped,
}

fn percentage(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u32
}

/// Completion ratio over the habits due on `date`.
pub fn daily_stats(habits: &[Habit], records: &[HabitRecord], date: NaiveDate) -> DailyStats {
    let due: Vec<&Habit> = habits.iter().filter(|h| is_due(h, date)).collect();
    let completed = due
        .iter()
        .filter(|habit| {
            find_record(records, &habit.id, date)
                .map_or(false, |record| record.meets(habit.target()))
        })
        .count();
    DailyStats {
        completed,
        total: due.len(),
        percentage: percentage(completed, due.len()),
    }
}

/// Percentage of due occurrences completed over the trailing seven days
/// (today included).
pub fn week_score(habits: &[Habit], records: &[HabitRecord], today: NaiveDate) -> u32 {
    let mut potential = 0usize;
    let mut done = 0usize;
    for offset in 0..7u64 {
        let Some(day) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };
        for habit in habits {
            if !is_due(habit, day) {
                continue;
            }
            potential += 1;
            if find_record(records, &habit.id, day)
                .map_or(false, |record| record.meets(habit.target()))
            {
                done += 1;
            }
        }
    }
    percentage(done, potential)
}

/// Per-habit streaks, best first. Archived habits are excluded.
pub fn habit_streaks(habits: &[Habit], records: &[HabitRecord], today: NaiveDate) -> Vec<HabitStreak> {
    let mut entries: Vec<HabitStreak> = habits
        .iter()
        .filter(|habit| !habit.is_archived)
        .map(|habit| HabitStreak {
            habit_id: habit.id.clone(),
            streak: compute_streak(&habit.id, records, habits, today),
        })
        .collect();
    entries.sort_by(|a, b| b.streak.current.cmp(&a.streak.current));
    entries
}

pub fn global_stats(habits: &[Habit], records: &[HabitRecord], today: NaiveDate) -> GlobalStats {
    let mut best_streak = 0u32;
    let mut active_streak = 0u32;
    for habit in habits {
        let streak = compute_streak(&habit.id, records, habits, today);
        best_streak = best_streak.max(streak.longest);
        active_streak = active_streak.max(streak.current);
    }
    GlobalStats {
        active_count: habits.iter().filter(|h| !h.is_archived).count(),
        best_streak,
        active_streak,
        week_percentage: week_score(habits, records, today),
        total_completions: records.iter().filter(|record| record.value > 0).count(),
    }
}

/// Classifies a calendar day, either across all habits or for a single one.
///
/// Across all habits the day is `Full` only when every tracked habit hit
/// its target; a skip only surfaces in the single-habit view, where an
/// excused day is reported distinctly from a missed one.
pub fn day_status(
    habits: &[Habit],
    records: &[HabitRecord],
    date: NaiveDate,
    habit_id: Option<&str>,
) -> DayStatus {
    match habit_id {
        Some(id) => {
            let Some(habit) = habits.iter().find(|h| h.id == id) else {
                return DayStatus::Missed;
            };
            let Some(record) = find_record(records, id, date) else {
                return DayStatus::Missed;
            };
            if record.is_skipped {
                DayStatus::Skipped
            } else if record.value >= habit.target() {
                DayStatus::Full
            } else {
                DayStatus::Partial
            }
        }
        None => {
            let completed = records
                .iter()
                .filter(|record| record.date == date)
                .filter(|record| {
                    habits
                        .iter()
                        .find(|habit| habit.id == record.habit_id)
                        .map_or(false, |habit| record.meets(habit.target()))
                })
                .count();
            if completed == 0 {
                DayStatus::Missed
            } else if completed >= habits.len() && !habits.is_empty() {
                DayStatus::Full
            } else {
                DayStatus::Partial
            }
        }
    }
}
