use chrono::{TimeZone, Utc};
use healthtrack_core::{Category, KeyValueStore, MemoryKvStore, Reminder, ReminderStore};
use serde_json::Value;

#[test]
fn missing_snapshot_loads_as_empty_list() {
    let kv = MemoryKvStore::new();
    let store = ReminderStore::new(&kv);

    assert!(store.load().is_empty());
    assert_eq!(kv.get_item("reminders").unwrap(), None);
}

#[test]
fn corrupt_snapshot_loads_as_empty_list() {
    let kv = MemoryKvStore::new();
    kv.set_item("reminders", "{ not json ]").unwrap();

    let store = ReminderStore::new(&kv);
    assert!(store.load().is_empty());
}

#[test]
fn snapshot_round_trips_through_the_store() {
    let kv = MemoryKvStore::new();
    let store = ReminderStore::new(&kv);
    let date = Utc.with_ymd_and_hms(2025, 7, 2, 9, 0, 0).unwrap();

    let mut reminder = Reminder::new(
        "1751446800000".to_string(),
        "Khám bệnh",
        "mang theo sổ khám",
        Category::Health,
        date,
    );
    reminder.notification_id = Some("alert-7".to_string());
    store.save(&[reminder.clone()]).unwrap();

    let loaded = store.load();
    assert_eq!(loaded, vec![reminder]);
}

#[test]
fn snapshot_uses_the_stored_wire_shape() {
    let kv = MemoryKvStore::new();
    let store = ReminderStore::new(&kv);
    let date = Utc.with_ymd_and_hms(2025, 7, 2, 9, 0, 0).unwrap();

    let mut reminder = Reminder::new(
        "42".to_string(),
        "Khám bệnh",
        "",
        Category::Health,
        date,
    );
    reminder.notification_id = Some("alert-1".to_string());
    store.save(&[reminder]).unwrap();

    let raw = kv.get_item("reminders").unwrap().expect("snapshot written");
    let json: Value = serde_json::from_str(&raw).unwrap();
    let entry = &json[0];

    assert_eq!(entry["id"], "42");
    assert_eq!(entry["category"], "health");
    assert_eq!(entry["notificationId"], "alert-1");
    assert_eq!(entry["completed"], false);
    assert!(entry["date"]
        .as_str()
        .expect("date serializes as a string")
        .starts_with("2025-07-02T09:00:00"));
}

#[test]
fn snapshot_without_notification_id_still_loads() {
    let kv = MemoryKvStore::new();
    kv.set_item(
        "reminders",
        r#"[{
            "id": "7",
            "title": "cũ",
            "note": "",
            "category": "general",
            "date": "2025-01-05T10:00:00Z",
            "completed": true
        }]"#,
    )
    .unwrap();

    let store = ReminderStore::new(&kv);
    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].notification_id, None);
    assert!(loaded[0].completed);
}
