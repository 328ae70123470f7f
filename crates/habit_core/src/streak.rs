use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::habit::Habit;
use crate::record::{find_record, HabitRecord};
use crate::schedule::is_due;

/// Hard cap on calendar days visited per scan, so pathological data
/// (a start date centuries in the past) cannot stall the caller.
pub const MAX_SCAN_DAYS: u32 = 5000;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    /// Today is due but its outcome is undecided: the day is not over, so
    /// it neither extends nor breaks the run yet.
    pub is_pending: bool,
}

/// Computes the consecutive-success streak for one habit by walking
/// backward from `today` through its record history.
///
/// Days the habit is not due on are transparent. A due day with a skipped
/// record is excused: the run survives but does not grow. A due day whose
/// record misses the target, or has no record at all, ends the run. An
/// unknown habit id yields the zero result; absent data is not an error
/// here.
pub fn compute_streak(
    habit_id: &str,
    records: &[HabitRecord],
    habits: &[Habit],
    today: NaiveDate,
) -> Streak {
    let Some(habit) = habits.iter().find(|h| h.id == habit_id) else {
        return Streak::default();
    };
    let target = habit.target();

    let completed_today =
        find_record(records, habit_id, today).map_or(false, |record| record.meets(target));
    let is_pending = is_due(habit, today) && !completed_today;

    // Backward scan starts at yesterday either way; a success today is
    // added back in afterwards.
    let mut current = 0u32;
    let mut cursor = today;
    for _ in 0..MAX_SCAN_DAYS {
        let Some(previous) = cursor.pred_opt() else {
            break;
        };
        cursor = previous;
        if cursor < habit.start_date {
            break;
        }
        if !is_due(habit, cursor) {
            continue;
        }
        match find_record(records, habit_id, cursor) {
            Some(record) if record.is_skipped => {}
            Some(record) if record.value >= target => current += 1,
            _ => break,
        }
    }
    if completed_today {
        current += 1;
    }

    let longest = longest_run(habit, records, today, is_pending).max(current);

    Streak {
        current,
        longest,
        is_pending,
    }
}

/// Single bounded forward pass over the habit's history to find the best
/// run ever, under the same skip and pending rules as the backward walk.
fn longest_run(
    habit: &Habit,
    records: &[HabitRecord],
    today: NaiveDate,
    pending_today: bool,
) -> u32 {
    let horizon = today
        .checked_sub_days(Days::new(u64::from(MAX_SCAN_DAYS - 1)))
        .unwrap_or(habit.start_date);
    let target = habit.target();

    let mut best = 0u32;
    let mut run = 0u32;
    let mut cursor = horizon.max(habit.start_date);
    while cursor <= today {
        if is_due(habit, cursor) {
            match find_record(records, &habit.id, cursor) {
                Some(record) if record.is_skipped => {}
                Some(record) if record.value >= target => {
                    run += 1;
                    best = best.max(run);
                }
                _ => {
                    if !(cursor == today && pending_today) {
                        run = 0;
                    }
                }
            }
        }
        let Some(next) = cursor.succ_opt() else {
            break;
        };
        cursor = next;
    }
    best
}
