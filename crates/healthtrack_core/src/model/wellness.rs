//! Wellness day-log model.
//!
//! # Responsibility
//! - Describe one calendar day of meal entries and exercise goals.
//! - Keep derived values (calorie totals, goal completion) recomputable
//!   from stored state.
//!
//! # Invariants
//! - `ExerciseGoal::completed` always equals `actual >= goal` after any
//!   mutation that goes through the service layer.
//! - Progress percentages are capped at 100.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Daily calorie intake target the tracker measures against.
pub const DAILY_CALORIE_TARGET: u32 = 2000;

/// Meal slot within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    /// Display label as the app shows it.
    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Bữa sáng",
            MealSlot::Lunch => "Bữa trưa",
            MealSlot::Dinner => "Bữa tối",
        }
    }

    /// All slots in day order.
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];
}

/// One logged dish with its calorie count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: Uuid,
    pub name: String,
    pub calories: u32,
}

impl MealEntry {
    pub fn new(name: impl Into<String>, calories: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calories,
        }
    }
}

/// Meal entries for one day, grouped by slot.
///
/// Serialized shape matches the app's stored object keyed
/// `breakfast`/`lunch`/`dinner`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    #[serde(default)]
    pub breakfast: Vec<MealEntry>,
    #[serde(default)]
    pub lunch: Vec<MealEntry>,
    #[serde(default)]
    pub dinner: Vec<MealEntry>,
}

impl MealPlan {
    pub fn entries(&self, slot: MealSlot) -> &[MealEntry] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    pub fn entries_mut(&mut self, slot: MealSlot) -> &mut Vec<MealEntry> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    /// Calories summed across every slot, saturating at `u32::MAX`.
    pub fn total_calories(&self) -> u32 {
        MealSlot::ALL
            .iter()
            .flat_map(|slot| self.entries(*slot))
            .fold(0u32, |total, entry| total.saturating_add(entry.calories))
    }
}

/// Tracked exercise activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Running,
    Pushups,
    Sleep,
}

impl ExerciseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Running => "running",
            ExerciseKind::Pushups => "pushups",
            ExerciseKind::Sleep => "sleep",
        }
    }

    /// Measurement unit label for this activity.
    pub fn unit(&self) -> &'static str {
        match self {
            ExerciseKind::Running => "km",
            ExerciseKind::Pushups => "lần",
            ExerciseKind::Sleep => "giờ",
        }
    }

    /// Default daily goal the tracker starts with.
    pub fn default_goal(&self) -> f64 {
        match self {
            ExerciseKind::Running => 5.0,
            ExerciseKind::Pushups => 30.0,
            ExerciseKind::Sleep => 8.0,
        }
    }

    pub const ALL: [ExerciseKind; 3] = [
        ExerciseKind::Running,
        ExerciseKind::Pushups,
        ExerciseKind::Sleep,
    ];
}

/// Goal-versus-actual pair for one activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseGoal {
    pub goal: f64,
    pub actual: f64,
    pub unit: String,
    pub completed: bool,
}

impl ExerciseGoal {
    /// Fresh goal with nothing logged yet.
    pub fn for_kind(kind: ExerciseKind) -> Self {
        Self {
            goal: kind.default_goal(),
            actual: 0.0,
            unit: kind.unit().to_string(),
            completed: false,
        }
    }

    /// Re-derives `completed` from the current goal and actual values.
    pub fn refresh_completed(&mut self) {
        self.completed = self.actual >= self.goal;
    }

    /// Progress toward the goal, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        if self.goal <= 0.0 {
            return 100.0;
        }
        (self.actual / self.goal * 100.0).min(100.0)
    }
}

/// Exercise goals for one day, keyed by activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseBoard {
    pub running: ExerciseGoal,
    pub pushups: ExerciseGoal,
    pub sleep: ExerciseGoal,
}

impl ExerciseBoard {
    pub fn goal(&self, kind: ExerciseKind) -> &ExerciseGoal {
        match kind {
            ExerciseKind::Running => &self.running,
            ExerciseKind::Pushups => &self.pushups,
            ExerciseKind::Sleep => &self.sleep,
        }
    }

    pub fn goal_mut(&mut self, kind: ExerciseKind) -> &mut ExerciseGoal {
        match kind {
            ExerciseKind::Running => &mut self.running,
            ExerciseKind::Pushups => &mut self.pushups,
            ExerciseKind::Sleep => &mut self.sleep,
        }
    }

    /// Number of activities whose goal is met.
    pub fn completed_count(&self) -> usize {
        ExerciseKind::ALL
            .iter()
            .filter(|kind| self.goal(**kind).completed)
            .count()
    }
}

impl Default for ExerciseBoard {
    fn default() -> Self {
        Self {
            running: ExerciseGoal::for_kind(ExerciseKind::Running),
            pushups: ExerciseGoal::for_kind(ExerciseKind::Pushups),
            sleep: ExerciseGoal::for_kind(ExerciseKind::Sleep),
        }
    }
}

/// Full wellness log for one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    #[serde(default)]
    pub meals: MealPlan,
    #[serde(default)]
    pub exercise: ExerciseBoard,
}

impl DayLog {
    pub fn total_calories(&self) -> u32 {
        self.meals.total_calories()
    }
}
