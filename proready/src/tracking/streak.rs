//! Day-boundary arithmetic for streak counters.
//!
//! A streak counts consecutive calendar days with at least one completed
//! session. Multiple sessions on the same day hold the streak; a session on
//! the day after the last active date extends it; anything later resets it
//! to one. `longest` never decreases and `total_days` counts distinct active
//! days, not sessions.

use crate::db::models::streaks::{ResourceStreakDBResponse, StreakDBResponse};
use chrono::{Days, NaiveDate};

/// In-memory streak counters, detached from their database row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakState {
    pub current: i32,
    pub longest: i32,
    pub total_days: i32,
    pub last_active: Option<NaiveDate>,
}

/// How a newly active day relates to the stored last active date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTransition {
    /// Same calendar day as the last activity: counters hold
    SameDay,
    /// Exactly the next day: the streak extends
    Consecutive,
    /// First activity ever, or a gap of more than one day: the streak restarts
    FirstOrBroken,
}

/// Classify `today` against the stored last active date.
///
/// A last active date in the future (clock skew) is treated as same-day so
/// counters never move backwards.
pub fn classify(last_active: Option<NaiveDate>, today: NaiveDate) -> DayTransition {
    match last_active {
        None => DayTransition::FirstOrBroken,
        Some(last) if last >= today => DayTransition::SameDay,
        Some(last) if last.checked_add_days(Days::new(1)) == Some(today) => DayTransition::Consecutive,
        Some(_) => DayTransition::FirstOrBroken,
    }
}

impl StreakState {
    /// Counters after recording activity on `today`.
    pub fn advanced(&self, today: NaiveDate) -> StreakState {
        match classify(self.last_active, today) {
            DayTransition::SameDay => self.clone(),
            DayTransition::Consecutive => {
                let current = self.current + 1;
                StreakState {
                    current,
                    longest: self.longest.max(current),
                    total_days: self.total_days + 1,
                    last_active: Some(today),
                }
            }
            DayTransition::FirstOrBroken => StreakState {
                current: 1,
                longest: self.longest.max(1),
                total_days: self.total_days + 1,
                last_active: Some(today),
            },
        }
    }
}

impl From<&StreakDBResponse> for StreakState {
    fn from(row: &StreakDBResponse) -> Self {
        Self {
            current: row.current_streak,
            longest: row.longest_streak,
            total_days: row.total_session_days,
            last_active: row.last_active_date,
        }
    }
}

impl From<&ResourceStreakDBResponse> for StreakState {
    fn from(row: &ResourceStreakDBResponse) -> Self {
        Self {
            current: row.current_streak,
            longest: row.longest_streak,
            // Per-resource rows don't track total active days
            total_days: 0,
            last_active: row.last_active_date,
        }
    }
}
