//! Core domain logic for HealthTrack.
//! This crate is the single source of truth for business invariants.

pub mod api;
pub mod calendar;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;

pub use api::{
    ApiClient, ApiError, ApiResult, ImageUploader, RegisterOutcome, UploadedImage, UsernameStatus,
};
pub use calendar::{default_range, month_grid, DateRange, RangePreset, RangeSelection};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::Account;
pub use model::family::{FamilyMember, FamilyMemberId, HealthStatus, Relation};
pub use model::reminder::{
    parse_category, parse_category_filter, time_until, Category, CategoryFilter, Reminder,
    ReminderId, TimeUntil,
};
pub use model::wellness::{
    DayLog, ExerciseBoard, ExerciseGoal, ExerciseKind, MealEntry, MealPlan, MealSlot,
    DAILY_CALORIE_TARGET,
};
pub use notify::{
    NoopNotificationProvider, NotificationCoordinator, NotificationError, NotificationHandle,
    NotificationProvider, OneShotRequest, PermissionStatus,
};
pub use service::family_service::{FamilyError, FamilyService};
pub use service::reminder_service::{ReminderDraft, ReminderError, ReminderService, ReminderStats};
pub use service::wellness_service::{DaySummary, RangeSummary, WellnessError, WellnessService};
pub use store::{
    FamilyStore, ReminderStore, SessionStore, StoreError, StoreResult, WellnessStore,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
