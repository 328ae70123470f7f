use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate, NaiveTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::habit::{Frequency, Habit, HabitKind, PomodoroConfig};
use crate::record::{self, HabitRecord};
use crate::reminders::{due_reminders, Reminder, ReminderRequest, ReminderSink};
use crate::schedule::is_due;
use crate::state::{AppState, Settings};
use crate::stats::{daily_stats, global_stats, habit_streaks, DailyStats, GlobalStats, HabitStreak};
use crate::store::StateStore;
use crate::streak::{compute_streak, Streak};

/// Everything the habit form collects; the service fills in identity,
/// lifecycle flags and the start date when the habit is created.
#[derive(Debug, Clone)]
pub struct HabitDraft {
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
    pub kind: HabitKind,
    pub category_id: Option<String>,
    pub target_value: i64,
    pub unit: Option<String>,
    pub frequency: Frequency,
    pub reminders: Vec<Reminder>,
    pub end_date: Option<NaiveDate>,
    pub pomodoro_config: Option<PomodoroConfig>,
}

/// Facade over the application state: loads it once on construction and
/// persists it after every mutation. All reads borrow the state behind a
/// lock; the engine modules stay pure underneath.
pub struct HabitService {
    store: StateStore,
    state: RwLock<AppState>,
    delivered: RwLock<HashSet<(String, String, NaiveDate)>>,
    reminder_sink: Option<Box<dyn ReminderSink>>,
}

pub struct HabitServiceBuilder {
    storage_dir: Option<PathBuf>,
    reminder_sink: Option<Box<dyn ReminderSink>>,
}

impl HabitServiceBuilder {
    pub fn new() -> Self {
        Self {
            storage_dir: None,
            reminder_sink: None,
        }
    }

    pub fn storage_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_reminder_sink(mut self, sink: Box<dyn ReminderSink>) -> Self {
        self.reminder_sink = Some(sink);
        self
    }

    pub fn build(self) -> Result<HabitService> {
        let dir = self
            .storage_dir
            .ok_or_else(|| anyhow!("storage directory is required"))?;
        let store = StateStore::new(dir);
        let state = store.load();
        tracing::debug!(
            path = %store.path().display(),
            habits = state.habits.len(),
            records = state.records.len(),
            "loaded application state"
        );
        Ok(HabitService {
            store,
            state: RwLock::new(state),
            delivered: RwLock::new(HashSet::new()),
            reminder_sink: self.reminder_sink,
        })
    }
}

impl HabitService {
    pub fn builder() -> HabitServiceBuilder {
        HabitServiceBuilder::new()
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    fn persist(&self, state: &AppState) -> Result<()> {
        self.store
            .save(state)
            .with_context(|| format!("persist state to {}", self.store.path().display()))
    }

    pub fn habits(&self) -> Vec<Habit> {
        self.state.read().habits.clone()
    }

    pub fn records(&self) -> Vec<HabitRecord> {
        self.state.read().records.clone()
    }

    pub fn settings(&self) -> Settings {
        self.state.read().settings.clone()
    }

    pub fn habits_due_on(&self, date: NaiveDate) -> Vec<Habit> {
        self.state
            .read()
            .habits
            .iter()
            .filter(|habit| is_due(habit, date))
            .cloned()
            .collect()
    }

    pub fn habits_due_today(&self) -> Vec<Habit> {
        self.habits_due_on(Self::today())
    }

    pub fn streak_for(&self, habit_id: &str) -> Streak {
        let state = self.state.read();
        compute_streak(habit_id, &state.records, &state.habits, Self::today())
    }

    pub fn daily_stats(&self) -> DailyStats {
        let state = self.state.read();
        daily_stats(&state.habits, &state.records, Self::today())
    }

    pub fn global_stats(&self) -> GlobalStats {
        let state = self.state.read();
        global_stats(&state.habits, &state.records, Self::today())
    }

    pub fn habit_streaks(&self) -> Vec<HabitStreak> {
        let state = self.state.read();
        habit_streaks(&state.habits, &state.records, Self::today())
    }

    /// Creates a habit from form data. Identity, creation time and the
    /// start date come from here, not from the caller.
    pub fn add_habit(&self, draft: HabitDraft) -> Result<Habit> {
        let habit = Habit {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            icon: draft.icon,
            color: draft.color,
            kind: draft.kind,
            category_id: draft.category_id,
            target_value: draft.target_value,
            unit: draft.unit,
            frequency: draft.frequency,
            reminders: draft.reminders,
            start_date: Self::today(),
            end_date: draft.end_date,
            is_archived: false,
            is_paused: false,
            created_at: Utc::now(),
            pomodoro_config: draft.pomodoro_config,
        };
        let mut state = self.state.write();
        state.habits.push(habit.clone());
        self.persist(&state)?;
        tracing::debug!(habit = %habit.name, id = %habit.id, "habit created");
        Ok(habit)
    }

    /// Replaces an existing habit wholesale, as the edit form does.
    pub fn update_habit(&self, habit: Habit) -> Result<()> {
        let mut state = self.state.write();
        let slot = state
            .habits
            .iter_mut()
            .find(|existing| existing.id == habit.id)
            .ok_or_else(|| anyhow!("unknown habit id {}", habit.id))?;
        *slot = habit;
        self.persist(&state)
    }

    /// Removes a habit and, with it, its entire record history.
    pub fn delete_habit(&self, habit_id: &str) -> Result<()> {
        let mut state = self.state.write();
        let before = state.habits.len();
        state.habits.retain(|habit| habit.id != habit_id);
        if state.habits.len() == before {
            return Err(anyhow!("unknown habit id {habit_id}"));
        }
        record::remove_for_habit(&mut state.records, habit_id);
        self.persist(&state)?;
        tracing::debug!(id = %habit_id, "habit deleted with its records");
        Ok(())
    }

    /// Writes today's progress for a habit.
    pub fn log_progress(&self, habit_id: &str, value: i64) -> Result<()> {
        self.log_progress_on(habit_id, Self::today(), value)
    }

    pub fn log_progress_on(&self, habit_id: &str, date: NaiveDate, value: i64) -> Result<()> {
        let mut state = self.state.write();
        if !state.habits.iter().any(|habit| habit.id == habit_id) {
            return Err(anyhow!("unknown habit id {habit_id}"));
        }
        record::upsert_record(&mut state.records, habit_id, date, value);
        self.persist(&state)
    }

    /// Toggles the excused marker on today's record.
    pub fn toggle_skip(&self, habit_id: &str) -> Result<()> {
        self.toggle_skip_on(habit_id, Self::today())
    }

    pub fn toggle_skip_on(&self, habit_id: &str, date: NaiveDate) -> Result<()> {
        let mut state = self.state.write();
        if !state.habits.iter().any(|habit| habit.id == habit_id) {
            return Err(anyhow!("unknown habit id {habit_id}"));
        }
        record::toggle_skip(&mut state.records, habit_id, date);
        self.persist(&state)
    }

    pub fn update_settings(&self, settings: Settings) -> Result<()> {
        let mut state = self.state.write();
        state.settings = settings;
        self.persist(&state)
    }

    /// Pretty-printed JSON of the full state, for user-driven backups.
    pub fn export_json(&self) -> Result<String> {
        let state = self.state.read();
        serde_json::to_string_pretty(&*state).context("encode state for export")
    }

    /// Evaluates reminders for the current local date and time. Meant to
    /// be driven by an external polling timer.
    pub fn poll_reminders(&self) -> Vec<ReminderRequest> {
        let now = Local::now();
        self.poll_reminders_at(now.date_naive(), now.time())
    }

    /// Same as [`poll_reminders`](Self::poll_reminders) with an explicit
    /// clock. Each (habit, reminder, date) fires at most once per service
    /// lifetime, so the timer can call this as often as it likes.
    pub fn poll_reminders_at(&self, date: NaiveDate, time: NaiveTime) -> Vec<ReminderRequest> {
        let ripe = {
            let state = self.state.read();
            due_reminders(&state.habits, &state.records, date, time)
        };
        let mut delivered = self.delivered.write();
        let fresh: Vec<ReminderRequest> = ripe
            .into_iter()
            .filter(|request| {
                delivered.insert((request.habit_id.clone(), request.reminder_id.clone(), date))
            })
            .collect();
        if let Some(sink) = &self.reminder_sink {
            for request in &fresh {
                sink.deliver(request.clone());
            }
        }
        fresh
    }
}
