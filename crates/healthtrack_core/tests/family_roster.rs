use chrono::NaiveDate;
use healthtrack_core::{
    FamilyError, FamilyService, FamilyStore, HealthStatus, KeyValueStore, MemoryKvStore, Relation,
};
use serde_json::Value;
use uuid::Uuid;

fn service(kv: &MemoryKvStore) -> FamilyService<&MemoryKvStore> {
    FamilyService::load(FamilyStore::new(kv))
}

#[test]
fn new_members_start_without_checkup_history() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);

    let member = svc.add_member("Nguyễn Văn A", Relation::Father, 62).unwrap();

    assert_eq!(member.last_check, None);
    assert_eq!(member.health_status, HealthStatus::NoData);
    assert!(!member.avatar.is_empty());
    assert_eq!(svc.members().len(), 1);
    assert_eq!(svc.healthy_count(), 0);
}

#[test]
fn add_member_validates_name_and_age() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);

    assert_eq!(
        svc.add_member("   ", Relation::Child, 8).unwrap_err(),
        FamilyError::EmptyName
    );
    assert_eq!(
        svc.add_member("Bé Na", Relation::Child, 0).unwrap_err(),
        FamilyError::InvalidAge
    );
    assert!(svc.members().is_empty());
}

#[test]
fn record_check_marks_member_healthy() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);
    let checked_on = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

    let member = svc.add_member("Trần Thị B", Relation::Mother, 58).unwrap();
    svc.record_check(member.id, checked_on, HealthStatus::Normal)
        .unwrap();

    let updated = svc.get(member.id).unwrap();
    assert_eq!(updated.last_check, Some(checked_on));
    assert!(updated.health_status.is_normal());
    assert_eq!(svc.healthy_count(), 1);
}

#[test]
fn record_check_for_unknown_member_fails() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);
    let missing = Uuid::new_v4();

    let err = svc
        .record_check(
            missing,
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            HealthStatus::Normal,
        )
        .unwrap_err();
    assert_eq!(err, FamilyError::MemberNotFound(missing));
}

#[test]
fn remove_member_is_idempotent() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);

    let member = svc.add_member("Em gái", Relation::YoungerSibling, 20).unwrap();
    assert!(svc.remove_member(member.id));
    assert!(!svc.remove_member(member.id));
    assert!(svc.members().is_empty());
}

#[test]
fn roster_snapshot_keeps_wire_keys() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);
    let checked_on = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    let member = svc.add_member("Chính chủ", Relation::Myself, 30).unwrap();
    svc.record_check(member.id, checked_on, HealthStatus::Normal)
        .unwrap();

    let raw = kv
        .get_item("family_members")
        .unwrap()
        .expect("snapshot written");
    let json: Value = serde_json::from_str(&raw).unwrap();
    let entry = &json[0];

    assert_eq!(entry["relation"], "self");
    assert_eq!(entry["lastCheck"], "2025-06-15");
    assert_eq!(entry["healthStatus"], "normal");
}

#[test]
fn roster_survives_reload() {
    let kv = MemoryKvStore::new();

    let member_id = {
        let mut svc = service(&kv);
        svc.add_member("Anh trai", Relation::ElderSibling, 35)
            .unwrap()
            .id
    };

    let svc = service(&kv);
    let member = svc.get(member_id).expect("member should survive reload");
    assert_eq!(member.name, "Anh trai");
    assert_eq!(member.relation, Relation::ElderSibling);
}
