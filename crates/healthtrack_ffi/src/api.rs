//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level reminder functions to Dart via FRB.
//! - Keep error semantics simple for early-stage UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Dates cross the boundary as UTC epoch milliseconds.
//! - Every failure envelope is mirrored into the Rust log before it is
//!   handed to Dart.
//!
//! # See also
//! - docs/architecture/notifications.md

use chrono::{DateTime, TimeZone, Utc};
use healthtrack_core::db::{immediate_transaction, open_db};
use healthtrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    parse_category, parse_category_filter, time_until, NotificationCoordinator, Reminder,
    ReminderDraft, ReminderService, ReminderStore, SqliteKvStore,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "healthtrack.sqlite3";
const DB_PATH_ENV: &str = "HEALTHTRACK_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One reminder shaped for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderView {
    /// Stable reminder id in string form.
    pub id: String,
    pub title: String,
    pub note: String,
    /// Category key (`general|health|work|personal`).
    pub category: String,
    /// Due instant as UTC epoch milliseconds.
    pub date_epoch_ms: i64,
    pub completed: bool,
    /// Human-readable countdown label relative to now.
    pub time_until: String,
}

/// List response envelope for the reminders screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderListResponse {
    /// Matching reminders in due-date order (empty on failure).
    pub items: Vec<ReminderView>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for reminder commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected reminder id, when one exists.
    pub reminder_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ReminderActionResponse {
    fn success(message: impl Into<String>, reminder_id: String) -> Self {
        Self {
            ok: true,
            reminder_id: Some(reminder_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("event=ffi_command module=ffi status=error error={message}");
        Self {
            ok: false,
            reminder_id: None,
            message,
        }
    }
}

/// Counters for the reminders dashboard header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderStatsResponse {
    pub total: u32,
    pub completed: u32,
    /// Future-dated reminders that are still open.
    pub upcoming: u32,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Lists reminders filtered by category key and search text.
///
/// Input semantics:
/// - `category`: `all` or one of the category keys.
/// - `search`: case-insensitive substring over title and note; blank matches all.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures return an empty list with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_list(category: String, search: String) -> ReminderListResponse {
    let filter = match parse_category_filter(category.as_str()) {
        Ok(filter) => filter,
        Err(err) => return list_failure(format!("reminder_list failed: {err}")),
    };

    let now = Utc::now();
    match with_reminder_service(|service| service.filter(filter, search.as_str())) {
        Ok(reminders) => {
            let items = reminders
                .into_iter()
                .map(|reminder| to_reminder_view(reminder, now))
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No reminders.".to_string()
            } else {
                format!("Found {} reminder(s).", items.len())
            };
            ReminderListResponse { items, message }
        }
        Err(err) => list_failure(format!("reminder_list failed: {err}")),
    }
}

/// Creates a reminder.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns operation result and the minted reminder id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_create(
    title: String,
    note: String,
    category: String,
    date_epoch_ms: i64,
) -> ReminderActionResponse {
    let (category, date) = match parse_draft_inputs(&category, date_epoch_ms) {
        Ok(parts) => parts,
        Err(message) => return ReminderActionResponse::failure(message),
    };
    let draft = ReminderDraft {
        title,
        note,
        category,
        date,
    };

    match with_reminder_service(|service| service.create(&draft, Utc::now())) {
        Ok(Ok(reminder)) => ReminderActionResponse::success("Reminder created.", reminder.id),
        Ok(Err(err)) => ReminderActionResponse::failure(format!("reminder_create failed: {err}")),
        Err(err) => ReminderActionResponse::failure(format!("reminder_create failed: {err}")),
    }
}

/// Rewrites an existing reminder's editable fields.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Unknown ids fail with a message; the completion flag is preserved.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_edit(
    id: String,
    title: String,
    note: String,
    category: String,
    date_epoch_ms: i64,
) -> ReminderActionResponse {
    let (category, date) = match parse_draft_inputs(&category, date_epoch_ms) {
        Ok(parts) => parts,
        Err(message) => return ReminderActionResponse::failure(message),
    };
    let draft = ReminderDraft {
        title,
        note,
        category,
        date,
    };

    match with_reminder_service(|service| service.edit(id.as_str(), &draft, Utc::now())) {
        Ok(Ok(reminder)) => ReminderActionResponse::success("Reminder updated.", reminder.id),
        Ok(Err(err)) => ReminderActionResponse::failure(format!("reminder_edit failed: {err}")),
        Err(err) => ReminderActionResponse::failure(format!("reminder_edit failed: {err}")),
    }
}

/// Flips a reminder's completion flag.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the new state in the message on success.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_toggle_complete(id: String) -> ReminderActionResponse {
    match with_reminder_service(|service| service.toggle_complete(id.as_str())) {
        Ok(Ok(completed)) => {
            let message = if completed {
                "Reminder marked completed."
            } else {
                "Reminder reopened."
            };
            ReminderActionResponse::success(message, id)
        }
        Ok(Err(err)) => {
            ReminderActionResponse::failure(format!("reminder_toggle_complete failed: {err}"))
        }
        Err(err) => {
            ReminderActionResponse::failure(format!("reminder_toggle_complete failed: {err}"))
        }
    }
}

/// Deletes a reminder.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Deleting an absent id is a successful no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_delete(id: String) -> ReminderActionResponse {
    match with_reminder_service(|service| service.delete(id.as_str())) {
        Ok(true) => ReminderActionResponse::success("Reminder deleted.", id),
        Ok(false) => ReminderActionResponse::success("Reminder already absent.", id),
        Err(err) => ReminderActionResponse::failure(format!("reminder_delete failed: {err}")),
    }
}

/// Returns dashboard counters over the stored reminders.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures return zeroed counters with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_stats() -> ReminderStatsResponse {
    match with_reminder_service(|service| service.stats(Utc::now())) {
        Ok(stats) => ReminderStatsResponse {
            total: stats.total as u32,
            completed: stats.completed as u32,
            upcoming: stats.upcoming as u32,
            message: String::new(),
        },
        Err(err) => {
            let message = format!("reminder_stats failed: {err}");
            warn!("event=ffi_command module=ffi status=error error={message}");
            ReminderStatsResponse {
                total: 0,
                completed: 0,
                upcoming: 0,
                message,
            }
        }
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

// Device alerts are scheduled by the Flutter layer; the embedded service
// runs with the disabled coordinator so commands never block on the OS.
// The whole load-modify-persist pass runs inside one immediate
// transaction, so parallel commands queue on the writer lock instead of
// overwriting each other's snapshot.
fn with_reminder_service<T>(
    f: impl FnOnce(&mut ReminderService<SqliteKvStore<'_>>) -> T,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let mut conn = open_db(&db_path).map_err(|err| format!("reminder DB open failed: {err}"))?;
    let tx = immediate_transaction(&mut conn)
        .map_err(|err| format!("reminder DB lock failed: {err}"))?;
    let outcome = {
        let kv = SqliteKvStore::new(&tx);
        let store = ReminderStore::new(kv);
        let mut service = ReminderService::load(store, NotificationCoordinator::disabled());
        f(&mut service)
    };
    tx.commit()
        .map_err(|err| format!("reminder DB commit failed: {err}"))?;
    Ok(outcome)
}

fn list_failure(message: String) -> ReminderListResponse {
    warn!("event=ffi_command module=ffi status=error error={message}");
    ReminderListResponse {
        items: Vec::new(),
        message,
    }
}

fn parse_draft_inputs(
    category: &str,
    date_epoch_ms: i64,
) -> Result<(healthtrack_core::Category, DateTime<Utc>), String> {
    let category = parse_category(category).map_err(|err| format!("invalid category: {err}"))?;
    let date = Utc
        .timestamp_millis_opt(date_epoch_ms)
        .single()
        .ok_or_else(|| format!("invalid date_epoch_ms {date_epoch_ms}"))?;
    Ok((category, date))
}

fn to_reminder_view(reminder: Reminder, now: DateTime<Utc>) -> ReminderView {
    let time_until = time_until(reminder.date, now).to_string();
    ReminderView {
        id: reminder.id,
        title: reminder.title,
        note: reminder.note,
        category: reminder.category.as_str().to_string(),
        date_epoch_ms: reminder.date.timestamp_millis(),
        completed: reminder.completed,
        time_until,
    }
}
