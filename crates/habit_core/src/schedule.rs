use chrono::{Datelike, NaiveDate};

use crate::habit::{Frequency, Habit};

/// Decides whether `date` is an active occurrence of `habit`.
///
/// Archived and paused habits are never due, nor is any date outside the
/// habit's `[start_date, end_date]` window. Within the window the habit's
/// recurrence rule dispatches: interval habits are phase-anchored to
/// `start_date`, so editing the start date recomputes historical
/// occurrences as well.
pub fn is_due(habit: &Habit, date: NaiveDate) -> bool {
    if habit.is_archived || habit.is_paused {
        return false;
    }
    if date < habit.start_date {
        return false;
    }
    if let Some(end) = habit.end_date {
        if date > end {
            return false;
        }
    }

    match &habit.frequency {
        Frequency::Daily => true,
        Frequency::Weekdays { weekdays } => {
            weekdays.contains(&(date.weekday().num_days_from_sunday() as u8))
        }
        Frequency::Interval { interval } => {
            let days = (date - habit.start_date).num_days();
            days % i64::from((*interval).max(1)) == 0
        }
        Frequency::Monthly { monthly_days } => monthly_days.contains(&(date.day() as u8)),
        Frequency::Unknown => false,
    }
}
