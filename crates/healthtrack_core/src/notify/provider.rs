//! Notification provider port.
//!
//! # Responsibility
//! - Describe the surface an OS notification adapter must implement.
//! - Ship the no-op adapter used when the capability is absent.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::model::reminder::Reminder;

/// Opaque handle returned by the provider for later cancellation.
pub type NotificationHandle = String;

/// Fallback alert title when a reminder somehow carries a blank one.
const DEFAULT_ALERT_TITLE: &str = "Nhắc nhở";
/// Fallback alert body when the reminder has no note.
const DEFAULT_ALERT_BODY: &str = "Bạn có nhắc nhở";

/// Current permission standing reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Undetermined,
}

/// Failure reported by a provider call.
///
/// Always swallowed by the coordinator; carried as a message for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationError {
    pub message: String,
}

impl NotificationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for NotificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification provider failure: {}", self.message)
    }
}

impl std::error::Error for NotificationError {}

/// Payload for a one-shot local notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShotRequest {
    pub title: String,
    pub body: String,
    /// Carried in the notification data so a tap can open the reminder.
    pub reminder_id: String,
    pub trigger_at: DateTime<Utc>,
}

impl OneShotRequest {
    /// Builds the alert payload for a reminder.
    ///
    /// Blank titles and notes fall back to the app's default alert text.
    pub fn for_reminder(reminder: &Reminder) -> Self {
        let title = if reminder.title.trim().is_empty() {
            DEFAULT_ALERT_TITLE.to_string()
        } else {
            reminder.title.clone()
        };
        let body = if reminder.note.trim().is_empty() {
            DEFAULT_ALERT_BODY.to_string()
        } else {
            reminder.note.clone()
        };
        Self {
            title,
            body,
            reminder_id: reminder.id.clone(),
            trigger_at: reminder.date,
        }
    }
}

/// Adapter surface for the OS notification service.
///
/// Implementations live in the platform shell; core only ships the no-op
/// adapter. Every method may fail and every failure is non-fatal to the
/// caller.
pub trait NotificationProvider {
    /// Whether the capability exists on this device at all.
    ///
    /// Checked once per scheduling attempt before any other call.
    fn is_available(&self) -> bool {
        true
    }

    fn permission_status(&self) -> Result<PermissionStatus, NotificationError>;

    /// Prompts the user. Only called when the status is undetermined.
    fn request_permission(&self) -> Result<PermissionStatus, NotificationError>;

    fn schedule_one_shot(
        &self,
        request: &OneShotRequest,
    ) -> Result<NotificationHandle, NotificationError>;

    fn cancel(&self, handle: &str) -> Result<(), NotificationError>;
}

/// Adapter installed when the device has no notification service.
///
/// All calls are no-ops; scheduling is reported unavailable so reminders
/// save without a device alert.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotificationProvider;

impl NotificationProvider for NoopNotificationProvider {
    fn is_available(&self) -> bool {
        false
    }

    fn permission_status(&self) -> Result<PermissionStatus, NotificationError> {
        Ok(PermissionStatus::Denied)
    }

    fn request_permission(&self) -> Result<PermissionStatus, NotificationError> {
        Ok(PermissionStatus::Denied)
    }

    fn schedule_one_shot(
        &self,
        _request: &OneShotRequest,
    ) -> Result<NotificationHandle, NotificationError> {
        Err(NotificationError::new("notification capability unavailable"))
    }

    fn cancel(&self, _handle: &str) -> Result<(), NotificationError> {
        Ok(())
    }
}
