use std::sync::{Arc, Mutex};

use chrono::NaiveTime;
use habit_core::habit::{Frequency, HabitKind};
use habit_core::reminders::{Reminder, ReminderKind, ReminderRequest, ReminderSchedule, ReminderSink};
use habit_core::service::{HabitDraft, HabitService};
use tempfile::tempdir;

fn draft(name: &str) -> HabitDraft {
    HabitDraft {
        name: name.to_string(),
        description: None,
        icon: "activity".to_string(),
        color: "#3b82f6".to_string(),
        kind: HabitKind::YesNo,
        category_id: None,
        target_value: 1,
        unit: None,
        frequency: Frequency::Daily,
        reminders: Vec::new(),
        end_date: None,
        pomodoro_config: None,
    }
}

#[test]
fn state_survives_a_service_restart() {
    let dir = tempdir().expect("tempdir");

    let habit_id = {
        let service = HabitService::builder()
            .storage_dir(dir.path())
            .build()
            .expect("build service");
        let habit = service.add_habit(draft("Morning walk")).expect("add habit");
        service.log_progress(&habit.id, 1).expect("log progress");
        habit.id
    };

    let reopened = HabitService::builder()
        .storage_dir(dir.path())
        .build()
        .expect("reopen service");

    let habits = reopened.habits();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].name, "Morning walk");

    let records = reopened.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].habit_id, habit_id);
    assert_eq!(records[0].value, 1);
    assert!(!records[0].is_skipped);

    // The habit started today and is already done, so the streak is one
    // and nothing is pending.
    let streak = reopened.streak_for(&habit_id);
    assert_eq!(streak.current, 1);
    assert_eq!(streak.longest, 1);
    assert!(!streak.is_pending);

    let stats = reopened.daily_stats();
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.total, 1);
    assert_eq!(stats.percentage, 100);
}

#[test]
fn deleting_a_habit_cascades_to_its_records() {
    let dir = tempdir().expect("tempdir");
    let service = HabitService::builder()
        .storage_dir(dir.path())
        .build()
        .expect("build service");

    let keep = service.add_habit(draft("Keep")).expect("add habit");
    let doomed = service.add_habit(draft("Drop")).expect("add habit");
    service.log_progress(&keep.id, 1).expect("log progress");
    service.log_progress(&doomed.id, 1).expect("log progress");

    service.delete_habit(&doomed.id).expect("delete habit");

    let reopened = HabitService::builder()
        .storage_dir(dir.path())
        .build()
        .expect("reopen service");
    assert_eq!(reopened.habits().len(), 1);
    let records = reopened.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].habit_id, keep.id);
}

#[test]
fn export_contains_the_full_state_document() {
    let dir = tempdir().expect("tempdir");
    let service = HabitService::builder()
        .storage_dir(dir.path())
        .build()
        .expect("build service");
    service.add_habit(draft("Hydrate")).expect("add habit");

    let exported = service.export_json().expect("export");
    assert!(exported.contains("\"Hydrate\""));
    assert!(exported.contains("\"Morning Routine\""));
    assert!(exported.contains("\"themeColor\""));
}

struct RecordingSink {
    seen: Arc<Mutex<Vec<ReminderRequest>>>,
}

impl ReminderSink for RecordingSink {
    fn deliver(&self, request: ReminderRequest) {
        self.seen.lock().expect("sink lock").push(request);
    }
}

#[test]
fn reminders_fire_once_per_day_through_the_service() {
    let dir = tempdir().expect("tempdir");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let service = HabitService::builder()
        .storage_dir(dir.path())
        .with_reminder_sink(Box::new(RecordingSink { seen: seen.clone() }))
        .build()
        .expect("build service");

    let mut wanted = draft("Stretch");
    wanted.reminders.push(Reminder {
        id: "r1".to_string(),
        time: NaiveTime::from_hms_opt(0, 0, 0).expect("valid time"),
        kind: ReminderKind::Notification,
        is_enabled: true,
        schedule: ReminderSchedule::Always,
    });
    let habit = service.add_habit(wanted).expect("add habit");

    // The habit starts today, so poll on the habit's own start date.
    let date = service.habits()[0].start_date;
    let noon = NaiveTime::from_hms_opt(12, 0, 0).expect("valid time");

    let first = service.poll_reminders_at(date, noon);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].habit_id, habit.id);
    assert_eq!(first[0].reminder_id, "r1");

    // Polling again the same day stays quiet.
    assert!(service.poll_reminders_at(date, noon).is_empty());

    // The next day it fires again.
    let next_day = date.succ_opt().expect("valid date");
    assert_eq!(service.poll_reminders_at(next_day, noon).len(), 1);

    let delivered = seen.lock().expect("sink lock");
    assert_eq!(delivered.len(), 2);
    assert!(delivered.iter().all(|request| request.title == "Stretch"));
}
