//! Family roster model.
//!
//! # Responsibility
//! - Describe household members tracked alongside the main account.
//! - Map the relation taxonomy to stable wire ids and display labels.
//!
//! # Invariants
//! - `id` is minted once and never reassigned.
//! - `age` is a positive whole number of years.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a family roster entry.
pub type FamilyMemberId = Uuid;

/// Relationship of a roster entry to the account owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    #[serde(rename = "self")]
    Myself,
    Spouse,
    Child,
    Father,
    Mother,
    ElderSibling,
    YoungerSibling,
    Other,
}

impl Relation {
    /// Stable string id used on the wire and in pickers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Myself => "self",
            Relation::Spouse => "spouse",
            Relation::Child => "child",
            Relation::Father => "father",
            Relation::Mother => "mother",
            Relation::ElderSibling => "elder_sibling",
            Relation::YoungerSibling => "younger_sibling",
            Relation::Other => "other",
        }
    }

    /// Display label as the app shows it.
    pub fn label(&self) -> &'static str {
        match self {
            Relation::Myself => "Chính mình",
            Relation::Spouse => "Vợ/Chồng",
            Relation::Child => "Con",
            Relation::Father => "Cha",
            Relation::Mother => "Mẹ",
            Relation::ElderSibling => "Anh/Chị",
            Relation::YoungerSibling => "Em",
            Relation::Other => "Khác",
        }
    }

    /// Default avatar glyph for entries added without an explicit one.
    pub fn default_avatar(&self) -> &'static str {
        match self {
            Relation::Myself | Relation::Father => "👨",
            Relation::Spouse | Relation::Mother => "👩",
            Relation::Child | Relation::YoungerSibling => "👦",
            _ => "👤",
        }
    }

    /// All relations in picker order.
    pub const ALL: [Relation; 8] = [
        Relation::Myself,
        Relation::Spouse,
        Relation::Child,
        Relation::Father,
        Relation::Mother,
        Relation::ElderSibling,
        Relation::YoungerSibling,
        Relation::Other,
    ];
}

/// Error for relation ids received from UI or FFI input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationParseError {
    Empty,
    Unknown(String),
}

impl std::fmt::Display for RelationParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationParseError::Empty => write!(f, "relation cannot be empty"),
            RelationParseError::Unknown(value) => write!(f, "unknown relation `{value}`"),
        }
    }
}

impl std::error::Error for RelationParseError {}

/// Parses a relation id (case-insensitive, trimmed).
pub fn parse_relation(raw: &str) -> Result<Relation, RelationParseError> {
    let normalized = raw.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(RelationParseError::Empty);
    }
    Relation::ALL
        .iter()
        .find(|relation| relation.as_str() == normalized)
        .copied()
        .ok_or(RelationParseError::Unknown(normalized))
}

/// Health standing shown on a member card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Last check came back fine.
    Normal,
    /// No checkup recorded yet.
    NoData,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "Bình thường",
            HealthStatus::NoData => "Chưa có dữ liệu",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, HealthStatus::Normal)
    }
}

/// One entry in the family roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: FamilyMemberId,
    pub name: String,
    pub relation: Relation,
    /// Whole years, always positive.
    pub age: u32,
    /// Emoji glyph shown on the member card.
    pub avatar: String,
    /// Day of the most recent recorded checkup, if any.
    #[serde(rename = "lastCheck", default)]
    pub last_check: Option<NaiveDate>,
    #[serde(rename = "healthStatus")]
    pub health_status: HealthStatus,
}

impl FamilyMember {
    /// Creates a roster entry with no checkup history yet.
    pub fn new(name: impl Into<String>, relation: Relation, age: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            relation,
            age,
            avatar: relation.default_avatar().to_string(),
            last_check: None,
            health_status: HealthStatus::NoData,
        }
    }
}
