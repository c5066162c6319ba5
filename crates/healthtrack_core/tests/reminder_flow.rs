use std::cell::{Cell, RefCell};
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use healthtrack_core::{
    time_until, Category, CategoryFilter, KeyValueStore, MemoryKvStore, NotificationCoordinator,
    NotificationError, NotificationHandle, NotificationProvider, OneShotRequest, PermissionStatus,
    Reminder, ReminderDraft, ReminderError, ReminderService, ReminderStore, TimeUntil,
};

/// Provider double that records every call and can be told to misbehave.
#[derive(Default)]
struct RecordingProvider {
    deny_permission: bool,
    fail_schedule: bool,
    scheduled: RefCell<Vec<OneShotRequest>>,
    cancelled: RefCell<Vec<String>>,
    minted: Cell<u64>,
}

impl RecordingProvider {
    fn granting() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn denying() -> Arc<Self> {
        Arc::new(Self {
            deny_permission: true,
            ..Self::default()
        })
    }

    fn throwing() -> Arc<Self> {
        Arc::new(Self {
            fail_schedule: true,
            ..Self::default()
        })
    }

    fn schedule_count(&self) -> usize {
        self.scheduled.borrow().len()
    }
}

impl NotificationProvider for RecordingProvider {
    fn permission_status(&self) -> Result<PermissionStatus, NotificationError> {
        if self.deny_permission {
            Ok(PermissionStatus::Denied)
        } else {
            Ok(PermissionStatus::Granted)
        }
    }

    fn request_permission(&self) -> Result<PermissionStatus, NotificationError> {
        self.permission_status()
    }

    fn schedule_one_shot(
        &self,
        request: &OneShotRequest,
    ) -> Result<NotificationHandle, NotificationError> {
        if self.fail_schedule {
            return Err(NotificationError::new("scheduler offline"));
        }
        self.scheduled.borrow_mut().push(request.clone());
        let serial = self.minted.get() + 1;
        self.minted.set(serial);
        Ok(format!("alert-{serial}"))
    }

    fn cancel(&self, handle: &str) -> Result<(), NotificationError> {
        self.cancelled.borrow_mut().push(handle.to_string());
        Ok(())
    }
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap()
}

fn draft(title: &str, category: Category, date: DateTime<Utc>) -> ReminderDraft {
    ReminderDraft {
        title: title.to_string(),
        note: String::new(),
        category,
        date,
    }
}

fn service_with(
    kv: &MemoryKvStore,
    provider: Arc<RecordingProvider>,
) -> ReminderService<&MemoryKvStore> {
    ReminderService::load(
        ReminderStore::new(kv),
        NotificationCoordinator::new(provider),
    )
}

#[test]
fn create_schedules_alert_and_keeps_chronological_order() {
    let kv = MemoryKvStore::new();
    let provider = RecordingProvider::granting();
    let mut service = service_with(&kv, provider.clone());
    let now = fixed_now();

    let late = service
        .create(&draft("late", Category::General, now + Duration::days(3)), now)
        .unwrap();
    let early = service
        .create(&draft("early", Category::General, now + Duration::days(1)), now)
        .unwrap();
    let middle = service
        .create(&draft("middle", Category::General, now + Duration::days(2)), now)
        .unwrap();

    assert_eq!(late.notification_id.as_deref(), Some("alert-1"));
    assert_eq!(provider.schedule_count(), 3);

    let order: Vec<&str> = service.all().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(order, vec!["early", "middle", "late"]);
    assert_eq!(service.all()[0].id, early.id);
    assert_eq!(service.all()[1].id, middle.id);
}

#[test]
fn create_rejects_blank_title_without_side_effects() {
    let kv = MemoryKvStore::new();
    let provider = RecordingProvider::granting();
    let mut service = service_with(&kv, provider.clone());

    let err = service
        .create(
            &draft("   ", Category::Health, fixed_now() + Duration::hours(2)),
            fixed_now(),
        )
        .unwrap_err();

    assert_eq!(err, ReminderError::EmptyTitle);
    assert!(service.all().is_empty());
    assert_eq!(provider.schedule_count(), 0);
    assert_eq!(kv.get_item("reminders").unwrap(), None);
}

#[test]
fn provider_fault_still_saves_the_reminder() {
    let kv = MemoryKvStore::new();
    let mut service = service_with(&kv, RecordingProvider::throwing());
    let now = fixed_now();

    let saved = service
        .create(&draft("Khám bệnh", Category::Health, now + Duration::days(1)), now)
        .unwrap();

    assert_eq!(saved.notification_id, None);
    assert_eq!(service.all().len(), 1);
    assert!(kv.get_item("reminders").unwrap().is_some());
}

#[test]
fn fresh_reminder_reports_day_then_hour_countdown() {
    let kv = MemoryKvStore::new();
    let mut service = service_with(&kv, RecordingProvider::granting());
    let now = fixed_now();
    let tomorrow_morning = now + Duration::hours(25);

    let saved = service
        .create(&draft("Khám bệnh", Category::Health, tomorrow_morning), now)
        .unwrap();

    assert!(!saved.completed);
    assert!(saved.notification_id.is_some());
    assert_eq!(time_until(saved.date, now), TimeUntil::Days(1));
    assert_eq!(
        time_until(saved.date, now + Duration::hours(20)),
        TimeUntil::Hours(5)
    );
}

#[test]
fn past_due_date_never_reaches_the_provider() {
    let kv = MemoryKvStore::new();
    let provider = RecordingProvider::granting();
    let mut service = service_with(&kv, provider.clone());
    let now = fixed_now();

    let saved = service
        .create(&draft("quá hạn", Category::General, now - Duration::hours(1)), now)
        .unwrap();

    assert_eq!(saved.notification_id, None);
    assert_eq!(provider.schedule_count(), 0);
}

#[test]
fn denied_permission_saves_without_handle() {
    let kv = MemoryKvStore::new();
    let provider = RecordingProvider::denying();
    let mut service = service_with(&kv, provider.clone());
    let now = fixed_now();

    let saved = service
        .create(&draft("no alerts", Category::Work, now + Duration::days(1)), now)
        .unwrap();

    assert_eq!(saved.notification_id, None);
    assert_eq!(provider.schedule_count(), 0);
    assert_eq!(service.all().len(), 1);
}

#[test]
fn edit_cancels_old_handle_before_scheduling_new_one() {
    let kv = MemoryKvStore::new();
    let provider = RecordingProvider::granting();
    let mut service = service_with(&kv, provider.clone());
    let now = fixed_now();

    let created = service
        .create(&draft("uống thuốc", Category::Health, now + Duration::days(1)), now)
        .unwrap();
    assert_eq!(created.notification_id.as_deref(), Some("alert-1"));

    let updated = service
        .edit(
            &created.id,
            &draft("uống thuốc tối", Category::Health, now + Duration::days(2)),
            now,
        )
        .unwrap();

    assert_eq!(provider.cancelled.borrow().as_slice(), ["alert-1"]);
    assert_eq!(updated.notification_id.as_deref(), Some("alert-2"));
    assert_eq!(updated.title, "uống thuốc tối");
    assert_eq!(updated.date, now + Duration::days(2));
}

#[test]
fn edit_preserves_completion_flag() {
    let kv = MemoryKvStore::new();
    let mut service = service_with(&kv, RecordingProvider::granting());
    let now = fixed_now();

    let created = service
        .create(&draft("tập thể dục", Category::Personal, now + Duration::days(1)), now)
        .unwrap();
    service.toggle_complete(&created.id).unwrap();

    let updated = service
        .edit(
            &created.id,
            &draft("tập thể dục sáng", Category::Personal, now + Duration::days(1)),
            now,
        )
        .unwrap();

    assert!(updated.completed);
}

#[test]
fn edit_and_toggle_report_not_found() {
    let kv = MemoryKvStore::new();
    let mut service = service_with(&kv, RecordingProvider::granting());
    let now = fixed_now();

    let edit_err = service
        .edit("999", &draft("x", Category::General, now), now)
        .unwrap_err();
    assert!(matches!(edit_err, ReminderError::NotFound(id) if id == "999"));

    let toggle_err = service.toggle_complete("999").unwrap_err();
    assert!(matches!(toggle_err, ReminderError::NotFound(_)));
}

#[test]
fn toggle_flips_both_ways_and_keeps_alert() {
    let kv = MemoryKvStore::new();
    let provider = RecordingProvider::granting();
    let mut service = service_with(&kv, provider.clone());
    let now = fixed_now();

    let created = service
        .create(&draft("đo huyết áp", Category::Health, now + Duration::days(1)), now)
        .unwrap();

    assert!(service.toggle_complete(&created.id).unwrap());
    assert!(!service.toggle_complete(&created.id).unwrap());
    assert!(provider.cancelled.borrow().is_empty());
    assert_eq!(
        service.get(&created.id).unwrap().notification_id.as_deref(),
        Some("alert-1")
    );
}

#[test]
fn delete_cancels_handle_and_is_idempotent() {
    let kv = MemoryKvStore::new();
    let provider = RecordingProvider::granting();
    let mut service = service_with(&kv, provider.clone());
    let now = fixed_now();

    let created = service
        .create(&draft("hẹn khám", Category::Health, now + Duration::days(1)), now)
        .unwrap();

    assert!(service.delete(&created.id));
    assert_eq!(provider.cancelled.borrow().as_slice(), ["alert-1"]);
    assert!(service.all().is_empty());

    assert!(!service.delete(&created.id));
    assert_eq!(provider.cancelled.borrow().len(), 1);
}

#[test]
fn filter_composes_category_and_search() {
    let kv = MemoryKvStore::new();
    let mut service = service_with(&kv, RecordingProvider::granting());
    let now = fixed_now();

    service
        .create(&draft("Khám bệnh", Category::Health, now + Duration::days(1)), now)
        .unwrap();
    service
        .create(&draft("Tái khám", Category::Personal, now + Duration::days(2)), now)
        .unwrap();
    service
        .create(&draft("Đi bộ", Category::Health, now + Duration::days(3)), now)
        .unwrap();

    assert_eq!(service.filter(CategoryFilter::All, "").len(), 3);
    assert_eq!(
        service.filter(CategoryFilter::Only(Category::Health), "").len(),
        2
    );

    let hits = service.filter(CategoryFilter::Only(Category::Health), "khám");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Khám bệnh");

    let blank_search = service.filter(CategoryFilter::All, "   ");
    assert_eq!(blank_search.len(), 3);
}

#[test]
fn stats_count_total_completed_and_upcoming() {
    let kv = MemoryKvStore::new();
    let mut service = service_with(&kv, RecordingProvider::granting());
    let now = fixed_now();

    let done = service
        .create(&draft("done soon", Category::General, now + Duration::days(1)), now)
        .unwrap();
    service
        .create(&draft("open future", Category::General, now + Duration::days(2)), now)
        .unwrap();
    service
        .create(&draft("open past", Category::General, now - Duration::days(1)), now)
        .unwrap();
    service.toggle_complete(&done.id).unwrap();

    let stats = service.stats(now);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.upcoming, 1);
}

#[test]
fn mutations_survive_reload_from_the_same_store() {
    let kv = MemoryKvStore::new();
    let now = fixed_now();

    let created_id = {
        let mut service = service_with(&kv, RecordingProvider::granting());
        let created = service
            .create(&draft("bền vững", Category::Work, now + Duration::days(1)), now)
            .unwrap();
        service.toggle_complete(&created.id).unwrap();
        created.id
    };

    let reloaded = service_with(&kv, RecordingProvider::granting());
    let found = reloaded.get(&created_id).expect("reminder should survive");
    assert!(found.completed);
    assert_eq!(found.title, "bền vững");
}

#[test]
fn load_resorts_a_tampered_snapshot() {
    let kv = MemoryKvStore::new();
    let now = fixed_now();

    let b = Reminder::new(
        "2".to_string(),
        "second",
        "",
        Category::General,
        now + Duration::days(2),
    );
    let a = Reminder::new(
        "1".to_string(),
        "first",
        "",
        Category::General,
        now + Duration::days(1),
    );
    let out_of_order = serde_json::to_string(&vec![b, a]).unwrap();
    kv.set_item("reminders", &out_of_order).unwrap();

    let service = service_with(&kv, RecordingProvider::granting());
    let titles: Vec<&str> = service.all().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second"]);
}

#[test]
fn equal_dates_break_ties_by_id() {
    let kv = MemoryKvStore::new();
    let now = fixed_now();
    let date = now + Duration::days(1);

    let later_id = Reminder::new("20".to_string(), "b", "", Category::General, date);
    let earlier_id = Reminder::new("10".to_string(), "a", "", Category::General, date);
    let snapshot = serde_json::to_string(&vec![later_id, earlier_id]).unwrap();
    kv.set_item("reminders", &snapshot).unwrap();

    let service = service_with(&kv, RecordingProvider::granting());
    let ids: Vec<&str> = service.all().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["10", "20"]);
}
