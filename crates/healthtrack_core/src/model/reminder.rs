//! Reminder domain model.
//!
//! # Responsibility
//! - Define the persisted reminder record and its category taxonomy.
//! - Classify how far away a fire time is for countdown display.
//!
//! # Invariants
//! - `id` is stable for the reminder's lifetime and never reused.
//! - `title` is non-empty after trimming; services enforce this on write.
//! - `notification_id` is `Some` only while a device notification is
//!   scheduled for this reminder.
//!
//! # See also
//! - docs/architecture/data-model.md

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier for a reminder.
///
/// Opaque epoch-millisecond string minted at creation time. Kept as a type
/// alias to make semantic intent explicit in signatures.
pub type ReminderId = String;

/// Category taxonomy for reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Anything that does not fit a dedicated bucket.
    General,
    /// Medical appointments and medication schedules.
    Health,
    /// Work-related deadlines.
    Work,
    /// Personal errands.
    Personal,
}

impl Category {
    /// Stable string id used on the wire and in filter inputs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Health => "health",
            Category::Work => "work",
            Category::Personal => "personal",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::General
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for category strings received from UI or FFI input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    /// Input was empty or whitespace-only.
    Empty,
    /// Input did not match any known category id.
    Unknown(String),
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryParseError::Empty => write!(f, "category cannot be empty"),
            CategoryParseError::Unknown(value) => {
                write!(
                    f,
                    "unknown category `{value}`; expected general|health|work|personal"
                )
            }
        }
    }
}

impl std::error::Error for CategoryParseError {}

/// Parses a category id (case-insensitive, trimmed).
pub fn parse_category(raw: &str) -> Result<Category, CategoryParseError> {
    let normalized = raw.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "" => Err(CategoryParseError::Empty),
        "general" => Ok(Category::General),
        "health" => Ok(Category::Health),
        "work" => Ok(Category::Work),
        "personal" => Ok(Category::Personal),
        _ => Err(CategoryParseError::Unknown(normalized)),
    }
}

/// Category filter for list views.
///
/// `All` is the identity filter; anything else matches one category exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Returns whether a reminder in `category` passes this filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => *only == category,
        }
    }
}

/// Parses a filter id; `all` selects the identity filter.
pub fn parse_category_filter(raw: &str) -> Result<CategoryFilter, CategoryParseError> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(CategoryFilter::All);
    }
    parse_category(raw).map(CategoryFilter::Only)
}

/// Persisted reminder record.
///
/// Serialized shape matches the app's stored snapshot exactly, including the
/// camelCase `notificationId` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Opaque stable id, minted once at creation.
    pub id: ReminderId,
    /// Short display title. Never blank after trimming.
    pub title: String,
    /// Free-form body text, may be empty.
    pub note: String,
    pub category: Category,
    /// Fire time. May lie in the past; nothing enforces retroactively.
    pub date: DateTime<Utc>,
    /// Completion flag, toggled independently of edits.
    pub completed: bool,
    /// Device notification handle while one is scheduled.
    #[serde(rename = "notificationId")]
    pub notification_id: Option<String>,
}

impl Reminder {
    /// Creates a fresh, incomplete reminder without a device notification.
    ///
    /// # Invariants
    /// - `completed` starts `false`.
    /// - `notification_id` starts `None` until a coordinator schedules one.
    pub fn new(
        id: ReminderId,
        title: impl Into<String>,
        note: impl Into<String>,
        category: Category,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            note: note.into(),
            category,
            date,
            completed: false,
            notification_id: None,
        }
    }

    /// Returns whether this reminder counts as upcoming at `now`.
    ///
    /// Upcoming means strictly future and not yet completed.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date > now && !self.completed
    }

    /// Case-insensitive substring match over title and note.
    ///
    /// `needle` must already be lowercased by the caller.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.note.to_lowercase().contains(needle)
    }
}

/// Mints a time-based reminder id from `now`.
///
/// Uniqueness against the live collection is the caller's job; services bump
/// the millisecond value until it is free.
pub fn mint_reminder_id(now: DateTime<Utc>) -> ReminderId {
    now.timestamp_millis().to_string()
}

/// Coarse countdown classification for a fire time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUntil {
    /// Fire time is at or before `now`.
    Past,
    /// At least one whole day away.
    Days(i64),
    /// Under a day but at least one whole hour away.
    Hours(i64),
    /// Under an hour away.
    Soon,
}

impl fmt::Display for TimeUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUntil::Past => write!(f, "past"),
            TimeUntil::Days(days) => write!(f, "in {days} days"),
            TimeUntil::Hours(hours) => write!(f, "in {hours} hours"),
            TimeUntil::Soon => write!(f, "soon"),
        }
    }
}

/// Classifies the distance from `now` to `date`.
///
/// Whole units with integer truncation: 47 hours away is `Days(1)`, 90
/// minutes away is `Hours(1)`. A fire time exactly at `now` is `Past`.
pub fn time_until(date: DateTime<Utc>, now: DateTime<Utc>) -> TimeUntil {
    if date <= now {
        return TimeUntil::Past;
    }
    let remaining = date - now;
    let days = remaining.num_days();
    if days >= 1 {
        return TimeUntil::Days(days);
    }
    let hours = remaining.num_hours();
    if hours >= 1 {
        return TimeUntil::Hours(hours);
    }
    TimeUntil::Soon
}
