//! Flutter-facing FFI crate for the HealthTrack core.
//!
//! # Responsibility
//! - Carry the FRB-exported API surface in [`api`].
//! - Keep binding-level glue out of the core crate.

pub mod api;
