//! Domain model for the health-tracking client.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep persisted wire shapes identical to the snapshots the mobile app
//!   already stores on device.
//!
//! # Invariants
//! - Every persisted entity carries a stable string or UUID identity.
//! - Wire field names stay camelCase where the stored JSON uses camelCase.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod account;
pub mod family;
pub mod reminder;
pub mod wellness;
