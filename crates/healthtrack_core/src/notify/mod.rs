//! Device notification coordination.
//!
//! # Responsibility
//! - Define the provider port the OS notification service is adapted to.
//! - Schedule and cancel one-shot alerts for reminders without ever
//!   failing the surrounding save.
//!
//! # Invariants
//! - Provider faults never propagate past the coordinator; the worst
//!   outcome is a reminder without a device alert.
//! - Availability is decided once by the installed provider, not per call
//!   site.
//!
//! # See also
//! - docs/architecture/notifications.md

pub mod coordinator;
pub mod provider;

pub use coordinator::NotificationCoordinator;
pub use provider::{
    NoopNotificationProvider, NotificationError, NotificationHandle, NotificationProvider,
    OneShotRequest, PermissionStatus,
};
