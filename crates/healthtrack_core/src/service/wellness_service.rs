//! Wellness tracker domain logic.
//!
//! # Responsibility
//! - Own the per-day meal and exercise logs and every mutation on them.
//! - Derive calorie totals and goal progress for single days and date
//!   ranges.
//!
//! # Invariants
//! - `ExerciseGoal::completed` is re-derived after every goal or actual
//!   change.
//! - Days are materialized lazily; reading a day never creates one.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use log::warn;
use uuid::Uuid;

use crate::calendar::DateRange;
use crate::kv::KeyValueStore;
use crate::model::wellness::{DayLog, ExerciseKind, MealEntry, MealSlot, DAILY_CALORIE_TARGET};
use crate::store::WellnessStore;

/// Validation errors for tracker input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WellnessError {
    /// Meal name was empty after trimming.
    EmptyMealName,
    /// Actual amount was negative or not a finite number.
    InvalidAmount,
    /// Goal must be a positive finite number.
    InvalidGoal,
}

impl fmt::Display for WellnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WellnessError::EmptyMealName => write!(f, "meal name cannot be empty"),
            WellnessError::InvalidAmount => write!(f, "amount must be a non-negative number"),
            WellnessError::InvalidGoal => write!(f, "goal must be a positive number"),
        }
    }
}

impl std::error::Error for WellnessError {}

/// Calorie and goal summary for one day of a range strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub calories: u32,
    pub goals_completed: usize,
}

/// Aggregate over a selected date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSummary {
    pub days: Vec<DaySummary>,
    pub total_calories: u32,
}

/// Use-case service owning the wellness day logs.
pub struct WellnessService<K: KeyValueStore> {
    days: BTreeMap<NaiveDate, DayLog>,
    store: WellnessStore<K>,
}

impl<K: KeyValueStore> WellnessService<K> {
    /// Loads all persisted day logs and takes ownership of them.
    pub fn load(store: WellnessStore<K>) -> Self {
        let days = store.load();
        Self { days, store }
    }

    /// The log for `date`, or a fresh default view when nothing is logged.
    pub fn day(&self, date: NaiveDate) -> DayLog {
        self.days.get(&date).cloned().unwrap_or_default()
    }

    /// Logs a dish in a meal slot.
    ///
    /// # Contract
    /// - Rejects a blank trimmed name; zero calories is allowed.
    /// - Returns the stored entry including its minted id.
    pub fn add_meal(
        &mut self,
        date: NaiveDate,
        slot: MealSlot,
        name: &str,
        calories: u32,
    ) -> Result<MealEntry, WellnessError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WellnessError::EmptyMealName);
        }

        let entry = MealEntry::new(name, calories);
        self.days
            .entry(date)
            .or_default()
            .meals
            .entries_mut(slot)
            .push(entry.clone());
        self.persist();
        Ok(entry)
    }

    /// Removes a logged dish. Missing entries are a no-op returning
    /// `false`.
    pub fn remove_meal(&mut self, date: NaiveDate, slot: MealSlot, entry_id: Uuid) -> bool {
        let day = match self.days.get_mut(&date) {
            Some(day) => day,
            None => return false,
        };
        let entries = day.meals.entries_mut(slot);
        let before = entries.len();
        entries.retain(|entry| entry.id != entry_id);
        let removed = entries.len() < before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Records the measured amount for an activity.
    ///
    /// # Contract
    /// - Rejects negative or non-finite amounts.
    /// - Re-derives goal completion from the new amount.
    pub fn set_exercise_actual(
        &mut self,
        date: NaiveDate,
        kind: ExerciseKind,
        actual: f64,
    ) -> Result<(), WellnessError> {
        if !actual.is_finite() || actual < 0.0 {
            return Err(WellnessError::InvalidAmount);
        }
        let goal = self.days.entry(date).or_default().exercise.goal_mut(kind);
        goal.actual = actual;
        goal.refresh_completed();
        self.persist();
        Ok(())
    }

    /// Adjusts the daily target for an activity.
    ///
    /// # Contract
    /// - Rejects zero, negative, and non-finite targets.
    /// - Re-derives goal completion against the new target.
    pub fn set_exercise_goal(
        &mut self,
        date: NaiveDate,
        kind: ExerciseKind,
        target: f64,
    ) -> Result<(), WellnessError> {
        if !target.is_finite() || target <= 0.0 {
            return Err(WellnessError::InvalidGoal);
        }
        let goal = self.days.entry(date).or_default().exercise.goal_mut(kind);
        goal.goal = target;
        goal.refresh_completed();
        self.persist();
        Ok(())
    }

    /// Calories logged on `date` across every meal slot.
    pub fn total_calories(&self, date: NaiveDate) -> u32 {
        self.days
            .get(&date)
            .map(DayLog::total_calories)
            .unwrap_or(0)
    }

    /// Calories still available against the daily target, floored at zero.
    pub fn remaining_calories(&self, date: NaiveDate) -> u32 {
        DAILY_CALORIE_TARGET.saturating_sub(self.total_calories(date))
    }

    /// Walks the range strip and summarizes each day.
    ///
    /// Days without a log contribute zero calories and zero completed
    /// goals.
    pub fn range_summary(&self, range: &DateRange) -> RangeSummary {
        let mut days = Vec::new();
        let mut total_calories = 0u32;
        for date in range.days() {
            let summary = match self.days.get(&date) {
                Some(log) => DaySummary {
                    date,
                    calories: log.total_calories(),
                    goals_completed: log.exercise.completed_count(),
                },
                None => DaySummary {
                    date,
                    calories: 0,
                    goals_completed: 0,
                },
            };
            total_calories = total_calories.saturating_add(summary.calories);
            days.push(summary);
        }
        RangeSummary {
            days,
            total_calories,
        }
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.days) {
            warn!("event=wellness_persist module=wellness status=error error={err}");
        }
    }
}
