pub mod habit;
pub mod record;
pub mod reminders;
pub mod schedule;
pub mod service;
pub mod state;
pub mod stats;
pub mod store;
pub mod streak;

pub use crate::schedule::is_due;
pub use crate::service::{HabitDraft, HabitService, HabitServiceBuilder};
pub use crate::streak::{compute_streak, Streak};
