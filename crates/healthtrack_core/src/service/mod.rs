//! Core use-case services.
//!
//! # Responsibility
//! - Own the canonical in-memory collections and orchestrate snapshot
//!   writes and notification side effects around them.
//! - Keep UI/FFI layers decoupled from storage details.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod family_service;
pub mod reminder_service;
pub mod wellness_service;
