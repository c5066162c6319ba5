//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `healthtrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use chrono::{Duration, Utc};
use healthtrack_core::{
    Category, MemoryKvStore, NotificationCoordinator, ReminderDraft, ReminderService,
    ReminderStore,
};

// The probe exercises the store and service wiring without touching the
// Flutter/FFI runtime or an on-disk database.
fn main() {
    println!("healthtrack_core ping={}", healthtrack_core::ping());
    println!(
        "healthtrack_core version={}",
        healthtrack_core::core_version()
    );

    let kv = MemoryKvStore::new();
    let store = ReminderStore::new(&kv);
    let mut service = ReminderService::load(store, NotificationCoordinator::disabled());

    let now = Utc::now();
    let draft = ReminderDraft {
        title: "Uống thuốc huyết áp".to_string(),
        note: String::new(),
        category: Category::Health,
        date: now + Duration::hours(8),
    };
    match service.create(&draft, now) {
        Ok(reminder) => {
            let stats = service.stats(now);
            println!(
                "reminder_probe id={} total={} upcoming={}",
                reminder.id, stats.total, stats.upcoming
            );
        }
        Err(err) => println!("reminder_probe error={err}"),
    }
}
