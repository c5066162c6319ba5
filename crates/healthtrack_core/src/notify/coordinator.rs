//! Schedule/cancel orchestration over the provider port.
//!
//! # Responsibility
//! - Decide whether a reminder earns a device notification and obtain the
//!   handle when it does.
//! - Guarantee the save path never fails because of the provider.
//!
//! # Invariants
//! - A reminder dated at or before `now` produces no provider call.
//! - Permission is requested at most once per scheduling attempt, and only
//!   from the undetermined state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::model::reminder::Reminder;
use crate::notify::provider::{
    NoopNotificationProvider, NotificationHandle, NotificationProvider, OneShotRequest,
    PermissionStatus,
};

/// Front door for scheduling and cancelling reminder alerts.
///
/// Wraps whichever provider the platform shell installed; the no-op
/// provider stands in when the capability is absent.
#[derive(Clone)]
pub struct NotificationCoordinator {
    provider: Arc<dyn NotificationProvider>,
}

impl NotificationCoordinator {
    pub fn new(provider: Arc<dyn NotificationProvider>) -> Self {
        Self { provider }
    }

    /// Coordinator for devices without a notification service.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopNotificationProvider))
    }

    /// Attempts to schedule a one-shot alert for `reminder`.
    ///
    /// Returns the provider handle on success and `None` in every other
    /// case: capability absent, fire time not strictly future, permission
    /// denied, or any provider fault. Failures are logged, never raised.
    pub fn schedule(&self, reminder: &Reminder, now: DateTime<Utc>) -> Option<NotificationHandle> {
        if !self.provider.is_available() {
            debug!(
                "event=notify_schedule module=notify status=skip reason=unavailable reminder_id={}",
                reminder.id
            );
            return None;
        }
        if reminder.date <= now {
            debug!(
                "event=notify_schedule module=notify status=skip reason=past_date reminder_id={}",
                reminder.id
            );
            return None;
        }

        let status = match self.provider.permission_status() {
            Ok(status) => status,
            Err(err) => {
                warn!(
                    "event=notify_schedule module=notify status=error stage=permission_query reminder_id={} error={err}",
                    reminder.id
                );
                return None;
            }
        };
        let status = if status == PermissionStatus::Undetermined {
            match self.provider.request_permission() {
                Ok(status) => status,
                Err(err) => {
                    warn!(
                        "event=notify_schedule module=notify status=error stage=permission_request reminder_id={} error={err}",
                        reminder.id
                    );
                    return None;
                }
            }
        } else {
            status
        };
        if status != PermissionStatus::Granted {
            debug!(
                "event=notify_schedule module=notify status=skip reason=permission_denied reminder_id={}",
                reminder.id
            );
            return None;
        }

        let request = OneShotRequest::for_reminder(reminder);
        match self.provider.schedule_one_shot(&request) {
            Ok(handle) => {
                info!(
                    "event=notify_schedule module=notify status=ok reminder_id={} handle={handle}",
                    reminder.id
                );
                Some(handle)
            }
            Err(err) => {
                warn!(
                    "event=notify_schedule module=notify status=error stage=schedule reminder_id={} error={err}",
                    reminder.id
                );
                None
            }
        }
    }

    /// Best-effort cancellation of a previously scheduled alert.
    ///
    /// Invalid handles and provider faults are swallowed.
    pub fn cancel(&self, handle: &str) {
        match self.provider.cancel(handle) {
            Ok(()) => {
                debug!("event=notify_cancel module=notify status=ok handle={handle}");
            }
            Err(err) => {
                warn!("event=notify_cancel module=notify status=error handle={handle} error={err}");
            }
        }
    }
}
