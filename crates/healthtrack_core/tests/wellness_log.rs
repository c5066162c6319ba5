use chrono::NaiveDate;
use healthtrack_core::{
    DateRange, ExerciseKind, KeyValueStore, MealSlot, MemoryKvStore, WellnessError,
    WellnessService, WellnessStore, DAILY_CALORIE_TARGET,
};
use serde_json::Value;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service(kv: &MemoryKvStore) -> WellnessService<&MemoryKvStore> {
    WellnessService::load(WellnessStore::new(kv))
}

#[test]
fn meals_accumulate_per_slot_and_total() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);
    let today = day(2025, 7, 1);

    svc.add_meal(today, MealSlot::Breakfast, "Phở bò", 450).unwrap();
    svc.add_meal(today, MealSlot::Breakfast, "Cà phê sữa", 120).unwrap();
    svc.add_meal(today, MealSlot::Dinner, "Cơm gà", 600).unwrap();

    let log = svc.day(today);
    assert_eq!(log.meals.breakfast.len(), 2);
    assert_eq!(log.meals.lunch.len(), 0);
    assert_eq!(log.meals.dinner.len(), 1);
    assert_eq!(svc.total_calories(today), 1170);
    assert_eq!(
        svc.remaining_calories(today),
        DAILY_CALORIE_TARGET - 1170
    );
}

#[test]
fn blank_meal_name_is_rejected() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);

    let err = svc
        .add_meal(day(2025, 7, 1), MealSlot::Lunch, "   ", 300)
        .unwrap_err();
    assert_eq!(err, WellnessError::EmptyMealName);
    assert!(svc.day(day(2025, 7, 1)).meals.lunch.is_empty());
}

#[test]
fn remove_meal_targets_one_entry() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);
    let today = day(2025, 7, 1);

    let keep = svc.add_meal(today, MealSlot::Lunch, "Bún chả", 550).unwrap();
    let drop = svc.add_meal(today, MealSlot::Lunch, "Trà đá", 5).unwrap();

    assert!(svc.remove_meal(today, MealSlot::Lunch, drop.id));
    assert!(!svc.remove_meal(today, MealSlot::Lunch, drop.id));

    let log = svc.day(today);
    assert_eq!(log.meals.lunch.len(), 1);
    assert_eq!(log.meals.lunch[0].id, keep.id);
}

#[test]
fn remaining_calories_saturates_at_zero() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);
    let today = day(2025, 7, 1);

    svc.add_meal(today, MealSlot::Dinner, "Tiệc buffet", 2600).unwrap();
    assert_eq!(svc.remaining_calories(today), 0);
}

#[test]
fn calorie_totals_saturate_instead_of_overflowing() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);
    let today = day(2025, 7, 1);

    svc.add_meal(today, MealSlot::Breakfast, "Phở bò", u32::MAX).unwrap();
    svc.add_meal(today, MealSlot::Lunch, "Trà đá", 1).unwrap();
    assert_eq!(svc.total_calories(today), u32::MAX);
    assert_eq!(svc.remaining_calories(today), 0);

    svc.add_meal(day(2025, 7, 2), MealSlot::Dinner, "Cơm gà", u32::MAX).unwrap();
    let summary = svc.range_summary(&DateRange::new(today, day(2025, 7, 2)));
    assert_eq!(summary.total_calories, u32::MAX);
}

#[test]
fn exercise_actual_drives_completion() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);
    let today = day(2025, 7, 1);

    svc.set_exercise_actual(today, ExerciseKind::Running, 3.0).unwrap();
    let board = svc.day(today).exercise;
    assert!(!board.running.completed);

    svc.set_exercise_actual(today, ExerciseKind::Running, 5.0).unwrap();
    let board = svc.day(today).exercise;
    assert!(board.running.completed);
    assert_eq!(board.completed_count(), 1);
}

#[test]
fn exercise_rejects_negative_actual_and_nonpositive_goal() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);
    let today = day(2025, 7, 1);

    assert_eq!(
        svc.set_exercise_actual(today, ExerciseKind::Pushups, -1.0),
        Err(WellnessError::InvalidAmount)
    );
    assert_eq!(
        svc.set_exercise_actual(today, ExerciseKind::Pushups, f64::NAN),
        Err(WellnessError::InvalidAmount)
    );
    assert_eq!(
        svc.set_exercise_goal(today, ExerciseKind::Sleep, 0.0),
        Err(WellnessError::InvalidGoal)
    );
}

#[test]
fn raising_the_goal_reopens_a_met_target() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);
    let today = day(2025, 7, 1);

    svc.set_exercise_actual(today, ExerciseKind::Sleep, 8.0).unwrap();
    assert!(svc.day(today).exercise.sleep.completed);

    svc.set_exercise_goal(today, ExerciseKind::Sleep, 9.0).unwrap();
    let goal = svc.day(today).exercise.sleep;
    assert!(!goal.completed);
    assert_eq!(goal.goal, 9.0);
    assert_eq!(goal.unit, "giờ");
}

#[test]
fn range_summary_walks_every_day_inclusive() {
    let kv = MemoryKvStore::new();
    let mut svc = service(&kv);

    svc.add_meal(day(2025, 7, 1), MealSlot::Breakfast, "Xôi", 400).unwrap();
    svc.add_meal(day(2025, 7, 3), MealSlot::Lunch, "Bánh mì", 350).unwrap();
    svc.set_exercise_actual(day(2025, 7, 3), ExerciseKind::Pushups, 30.0)
        .unwrap();

    let range = DateRange::new(day(2025, 7, 1), day(2025, 7, 3));
    let summary = svc.range_summary(&range);

    assert_eq!(summary.days.len(), 3);
    assert_eq!(summary.total_calories, 750);
    assert_eq!(summary.days[0].calories, 400);
    assert_eq!(summary.days[1].calories, 0);
    assert_eq!(summary.days[2].goals_completed, 1);
}

#[test]
fn day_reads_never_create_entries() {
    let kv = MemoryKvStore::new();
    let svc = service(&kv);

    let log = svc.day(day(2025, 7, 9));
    assert_eq!(log.total_calories(), 0);
    assert_eq!(kv.get_item("wellness_days").unwrap(), None);
}

#[test]
fn logs_survive_reload_and_keep_date_keys() {
    let kv = MemoryKvStore::new();
    let today = day(2025, 7, 1);

    {
        let mut svc = service(&kv);
        svc.add_meal(today, MealSlot::Breakfast, "Phở", 450).unwrap();
        svc.set_exercise_actual(today, ExerciseKind::Running, 5.5).unwrap();
    }

    let raw = kv
        .get_item("wellness_days")
        .unwrap()
        .expect("snapshot written");
    let json: Value = serde_json::from_str(&raw).unwrap();
    assert!(json.get("2025-07-01").is_some());
    assert_eq!(json["2025-07-01"]["exercise"]["running"]["actual"], 5.5);

    let svc = service(&kv);
    assert_eq!(svc.total_calories(today), 450);
    assert!(svc.day(today).exercise.running.completed);
}
