//! Family roster domain logic.
//!
//! # Responsibility
//! - Own the roster of tracked household members.
//! - Validate new entries and record checkup outcomes.

use std::fmt;

use chrono::NaiveDate;
use log::warn;

use crate::kv::KeyValueStore;
use crate::model::family::{FamilyMember, FamilyMemberId, HealthStatus, Relation};
use crate::store::FamilyStore;

/// Errors a caller can act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyError {
    /// Name was empty after trimming.
    EmptyName,
    /// Age must be a positive number of years.
    InvalidAge,
    /// No roster entry carries the given id.
    MemberNotFound(FamilyMemberId),
}

impl fmt::Display for FamilyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FamilyError::EmptyName => write!(f, "member name cannot be empty"),
            FamilyError::InvalidAge => write!(f, "member age must be positive"),
            FamilyError::MemberNotFound(id) => write!(f, "no family member with id `{id}`"),
        }
    }
}

impl std::error::Error for FamilyError {}

/// Use-case service owning the family roster.
pub struct FamilyService<K: KeyValueStore> {
    members: Vec<FamilyMember>,
    store: FamilyStore<K>,
}

impl<K: KeyValueStore> FamilyService<K> {
    /// Loads the persisted roster and takes ownership of it.
    pub fn load(store: FamilyStore<K>) -> Self {
        let members = store.load();
        Self { members, store }
    }

    /// Adds a member to the roster.
    ///
    /// # Contract
    /// - Rejects a blank trimmed name and a zero age.
    /// - New entries start with no checkup history.
    pub fn add_member(
        &mut self,
        name: &str,
        relation: Relation,
        age: u32,
    ) -> Result<FamilyMember, FamilyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FamilyError::EmptyName);
        }
        if age == 0 {
            return Err(FamilyError::InvalidAge);
        }

        let member = FamilyMember::new(name, relation, age);
        self.members.push(member.clone());
        self.persist();
        Ok(member)
    }

    /// Removes a member. Missing ids are a no-op returning `false`.
    pub fn remove_member(&mut self, id: FamilyMemberId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member.id != id);
        let removed = self.members.len() < before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Records a checkup outcome for a member.
    pub fn record_check(
        &mut self,
        id: FamilyMemberId,
        date: NaiveDate,
        status: HealthStatus,
    ) -> Result<(), FamilyError> {
        let member = self
            .members
            .iter_mut()
            .find(|member| member.id == id)
            .ok_or(FamilyError::MemberNotFound(id))?;
        member.last_check = Some(date);
        member.health_status = status;
        self.persist();
        Ok(())
    }

    /// The roster in insertion order.
    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    pub fn get(&self, id: FamilyMemberId) -> Option<&FamilyMember> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Number of members whose latest check came back normal.
    pub fn healthy_count(&self) -> usize {
        self.members
            .iter()
            .filter(|member| member.health_status.is_normal())
            .count()
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.members) {
            warn!("event=family_persist module=family status=error error={err}");
        }
    }
}
