//! Reminder domain logic.
//!
//! # Responsibility
//! - Own the canonical reminder collection and every transition on it.
//! - Coordinate snapshot persistence and device notifications around each
//!   mutation.
//!
//! # Invariants
//! - The collection is sorted ascending by fire time (ties broken by id)
//!   after every mutation and after load.
//! - A reminder holds at most one live notification handle; edits and
//!   deletes cancel the old handle before anything else happens to it.
//! - Snapshot write failures keep the in-memory state authoritative for
//!   the session; the next successful write repairs the record.
//!
//! # See also
//! - docs/architecture/data-model.md
//! - docs/architecture/notifications.md

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};

use crate::kv::KeyValueStore;
use crate::model::reminder::{
    mint_reminder_id, Category, CategoryFilter, Reminder, ReminderId,
};
use crate::notify::NotificationCoordinator;
use crate::store::ReminderStore;

/// Errors a caller can act on; storage and notification faults are
/// absorbed here and logged instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// Title was empty after trimming.
    EmptyTitle,
    /// No reminder carries the given id.
    NotFound(ReminderId),
}

impl fmt::Display for ReminderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderError::EmptyTitle => write!(f, "reminder title cannot be empty"),
            ReminderError::NotFound(id) => write!(f, "no reminder with id `{id}`"),
        }
    }
}

impl std::error::Error for ReminderError {}

/// Input for `create` and `edit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    pub title: String,
    pub note: String,
    pub category: Category,
    /// Fire time; pasts are stored but never scheduled.
    pub date: DateTime<Utc>,
}

/// Derived aggregate counters, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderStats {
    pub total: usize,
    pub completed: usize,
    /// Strictly future and not completed.
    pub upcoming: usize,
}

/// Use-case service owning the reminder collection.
pub struct ReminderService<K: KeyValueStore> {
    reminders: Vec<Reminder>,
    store: ReminderStore<K>,
    notifier: NotificationCoordinator,
}

impl<K: KeyValueStore> ReminderService<K> {
    /// Loads the persisted collection and takes ownership of it.
    ///
    /// # Contract
    /// - Never fails: unreadable snapshots start an empty session.
    /// - Restores the sort invariant even if the snapshot was tampered
    ///   with.
    pub fn load(store: ReminderStore<K>, notifier: NotificationCoordinator) -> Self {
        let mut reminders = store.load();
        sort_chronological(&mut reminders);
        info!(
            "event=reminders_loaded module=reminder status=ok count={}",
            reminders.len()
        );
        Self {
            reminders,
            store,
            notifier,
        }
    }

    /// Creates a reminder from `draft`.
    ///
    /// # Contract
    /// - Rejects a blank trimmed title with `EmptyTitle`; nothing is
    ///   stored or scheduled in that case.
    /// - Schedules a device alert only for strictly future dates; a failed
    ///   or skipped schedule still saves the reminder with no handle.
    /// - Returns the stored entity including its minted id.
    pub fn create(
        &mut self,
        draft: &ReminderDraft,
        now: DateTime<Utc>,
    ) -> Result<Reminder, ReminderError> {
        let title = normalized_title(draft)?;
        let id = self.mint_unique_id(now);
        let mut reminder = Reminder::new(
            id,
            title,
            draft.note.trim().to_string(),
            draft.category,
            draft.date,
        );
        reminder.notification_id = self.notifier.schedule(&reminder, now);

        self.reminders.push(reminder.clone());
        sort_chronological(&mut self.reminders);
        self.persist();
        debug!(
            "event=reminder_create module=reminder status=ok id={} category={}",
            reminder.id, reminder.category
        );
        Ok(reminder)
    }

    /// Rewrites an existing reminder's editable fields.
    ///
    /// # Contract
    /// - Rejects a blank trimmed title with `EmptyTitle` before touching
    ///   anything.
    /// - `NotFound` when the id is absent.
    /// - Cancels the previous notification handle first, then schedules
    ///   against the new date; the completion flag is left as it was.
    pub fn edit(
        &mut self,
        id: &str,
        draft: &ReminderDraft,
        now: DateTime<Utc>,
    ) -> Result<Reminder, ReminderError> {
        let title = normalized_title(draft)?;
        let index = match self.reminders.iter().position(|r| r.id == id) {
            Some(index) => index,
            None => return Err(ReminderError::NotFound(id.to_string())),
        };

        if let Some(handle) = self.reminders[index].notification_id.take() {
            self.notifier.cancel(&handle);
        }

        {
            let reminder = &mut self.reminders[index];
            reminder.title = title;
            reminder.note = draft.note.trim().to_string();
            reminder.category = draft.category;
            reminder.date = draft.date;
        }
        self.reminders[index].notification_id =
            self.notifier.schedule(&self.reminders[index], now);

        let updated = self.reminders[index].clone();
        sort_chronological(&mut self.reminders);
        self.persist();
        debug!(
            "event=reminder_edit module=reminder status=ok id={}",
            updated.id
        );
        Ok(updated)
    }

    /// Flips the completion flag.
    ///
    /// # Contract
    /// - `NotFound` when the id is absent.
    /// - Notifications are untouched; a completed reminder keeps its
    ///   scheduled alert.
    /// - Returns the new flag value.
    pub fn toggle_complete(&mut self, id: &str) -> Result<bool, ReminderError> {
        let reminder = self
            .reminders
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ReminderError::NotFound(id.to_string()))?;
        reminder.completed = !reminder.completed;
        let completed = reminder.completed;
        self.persist();
        Ok(completed)
    }

    /// Removes a reminder permanently.
    ///
    /// # Contract
    /// - Idempotent: a missing id is a no-op returning `false`, and the
    ///   snapshot is not rewritten.
    /// - Cancels the outstanding notification handle before removal.
    pub fn delete(&mut self, id: &str) -> bool {
        let index = match self.reminders.iter().position(|r| r.id == id) {
            Some(index) => index,
            None => {
                debug!(
                    "event=reminder_delete module=reminder status=skip reason=not_found id={id}"
                );
                return false;
            }
        };

        if let Some(handle) = self.reminders[index].notification_id.take() {
            self.notifier.cancel(&handle);
        }
        self.reminders.remove(index);
        self.persist();
        debug!("event=reminder_delete module=reminder status=ok id={id}");
        true
    }

    /// Read view filtered by category and search text.
    ///
    /// `CategoryFilter::All` is the identity filter. A non-blank trimmed
    /// `search` matches title or note case-insensitively; both filters
    /// compose.
    pub fn filter(&self, category: CategoryFilter, search: &str) -> Vec<Reminder> {
        let needle = search.trim().to_lowercase();
        self.reminders
            .iter()
            .filter(|reminder| category.matches(reminder.category))
            .filter(|reminder| needle.is_empty() || reminder.matches_search(&needle))
            .cloned()
            .collect()
    }

    /// Aggregate counters over the live collection.
    ///
    /// Recomputed every call rather than cached across mutations.
    pub fn stats(&self, now: DateTime<Utc>) -> ReminderStats {
        ReminderStats {
            total: self.reminders.len(),
            completed: self
                .reminders
                .iter()
                .filter(|reminder| reminder.completed)
                .count(),
            upcoming: self
                .reminders
                .iter()
                .filter(|reminder| reminder.is_upcoming(now))
                .count(),
        }
    }

    /// The full collection in chronological order.
    pub fn all(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn get(&self, id: &str) -> Option<&Reminder> {
        self.reminders.iter().find(|reminder| reminder.id == id)
    }

    fn mint_unique_id(&self, now: DateTime<Utc>) -> ReminderId {
        let mut cursor = now;
        loop {
            let candidate = mint_reminder_id(cursor);
            if !self.reminders.iter().any(|r| r.id == candidate) {
                return candidate;
            }
            cursor += Duration::milliseconds(1);
        }
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.reminders) {
            warn!("event=reminders_persist module=reminder status=error error={err}");
        }
    }
}

fn normalized_title(draft: &ReminderDraft) -> Result<String, ReminderError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ReminderError::EmptyTitle);
    }
    Ok(title.to_string())
}

fn sort_chronological(reminders: &mut [Reminder]) {
    reminders.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
}
