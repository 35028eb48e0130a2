mod common;

use std::sync::Arc;

use common::{clock_on, open_on, open_with_config, tiers_with_totals};
use tiered_budget::{
    config::Config,
    core::Clock,
    core::services::{SnapshotService, MAX_SNAPSHOT_HISTORY},
    domain::TierId,
    storage::{KeyValueStore, MemoryStore, LAST_SNAPSHOT_MONTH_KEY},
};

#[test]
fn snapshot_is_due_only_when_the_month_changes() {
    let today = clock_on(2025, 3, 31).today();
    assert!(SnapshotService::should_create_snapshot(None, today));
    assert!(SnapshotService::should_create_snapshot(Some("2025-02"), today));
    assert!(!SnapshotService::should_create_snapshot(Some("2025-03"), today));
}

#[test]
fn snapshot_captures_tier_state_for_the_month() {
    let mut tiers = tiers_with_totals([1250, 480, 450, 650]);
    tiers[1].expenses[0].enabled = false;
    let snapshot = SnapshotService::create_snapshot(1000, &tiers, &clock_on(2025, 4, 9));

    assert_eq!(snapshot.date, "2025-04");
    assert_eq!(snapshot.income, 1000);
    assert_eq!(snapshot.total_spending, 2350);
    assert_eq!(snapshot.money_left, -1350);
    assert!(!snapshot.survival_covered);

    let survival = &snapshot.priorities[0];
    assert!(survival.is_borderline);
    assert!(!survival.is_affordable);
    let important = &snapshot.priorities[1];
    assert_eq!(important.id, TierId::Important);
    assert_eq!(important.active_expenses, 0);
    assert_eq!(important.expense_count, 1);
    assert!(important.is_affordable);
}

#[test]
fn comparison_reports_changes_against_the_previous_month() {
    let tiers = tiers_with_totals([1000, 0, 0, 0]);
    let previous = SnapshotService::create_snapshot(2000, &tiers, &clock_on(2025, 1, 5));
    let current = SnapshotService::create_snapshot(2500, &tiers, &clock_on(2025, 2, 5));

    let comparison = SnapshotService::compare_snapshots(&current, Some(&previous));
    assert_eq!(comparison.income_change, 500);
    assert!((comparison.income_change_pct - 25.0).abs() < f64::EPSILON);
    assert_eq!(comparison.spending_change, 0);
    assert_eq!(comparison.spending_change_pct, 0.0);
    assert_eq!(comparison.money_left_change, 500);
    assert!((comparison.money_left_change_pct - 50.0).abs() < f64::EPSILON);

    let first = SnapshotService::compare_snapshots(&current, None);
    assert_eq!(first.income_change, 0);
    assert_eq!(first.money_left_change_pct, 0.0);
}

#[test]
fn comparison_uses_the_magnitude_of_a_negative_baseline() {
    let tiers = tiers_with_totals([1200, 0, 0, 0]);
    let previous = SnapshotService::create_snapshot(1000, &tiers, &clock_on(2025, 1, 5));
    let current = SnapshotService::create_snapshot(1300, &tiers, &clock_on(2025, 2, 5));

    assert_eq!(previous.money_left, -200);
    let comparison = SnapshotService::compare_snapshots(&current, Some(&previous));
    assert_eq!(comparison.money_left_change, 300);
    assert!((comparison.money_left_change_pct - 150.0).abs() < f64::EPSILON);
}

#[test]
fn zero_baselines_report_zero_percent() {
    let tiers = tiers_with_totals([0, 0, 0, 0]);
    let previous = SnapshotService::create_snapshot(0, &tiers, &clock_on(2025, 1, 5));
    let current = SnapshotService::create_snapshot(800, &tiers, &clock_on(2025, 2, 5));

    let comparison = SnapshotService::compare_snapshots(&current, Some(&previous));
    assert_eq!(comparison.income_change, 800);
    assert_eq!(comparison.income_change_pct, 0.0);
    assert_eq!(comparison.money_left_change_pct, 0.0);
}

#[test]
fn history_replaces_same_month_and_caps_length() {
    let tiers = tiers_with_totals([100, 0, 0, 0]);
    let mut history = Vec::new();
    for month in 1..=12 {
        let snapshot = SnapshotService::create_snapshot(1000, &tiers, &clock_on(2024, month, 3));
        history = SnapshotService::add_snapshot(snapshot, history);
    }
    for month in 1..=3 {
        let snapshot = SnapshotService::create_snapshot(1500, &tiers, &clock_on(2025, month, 3));
        history = SnapshotService::add_snapshot(snapshot, history);
    }
    assert_eq!(history.len(), MAX_SNAPSHOT_HISTORY);
    assert_eq!(history[0].date, "2025-03");
    assert_eq!(history.last().unwrap().date, "2024-04");

    let redo = SnapshotService::create_snapshot(1800, &tiers, &clock_on(2025, 3, 20));
    history = SnapshotService::add_snapshot(redo, history);
    assert_eq!(history.len(), MAX_SNAPSHOT_HISTORY);
    assert_eq!(history[0].income, 1800);
    assert_eq!(history.iter().filter(|entry| entry.date == "2025-03").count(), 1);
}

#[test]
fn manager_records_one_snapshot_per_month() {
    let store = Arc::new(MemoryStore::new());

    let mut manager = open_on(&store, clock_on(2025, 5, 2));
    manager.set_income("3000").unwrap();
    assert_eq!(manager.history().len(), 1);
    assert_eq!(manager.history()[0].income, 0);
    drop(manager);

    let again = open_on(&store, clock_on(2025, 5, 28));
    assert_eq!(again.history().len(), 1);
    drop(again);

    let next_month = open_on(&store, clock_on(2025, 6, 1));
    assert_eq!(next_month.history().len(), 2);
    assert_eq!(next_month.history()[0].date, "2025-06");
    assert_eq!(next_month.history()[0].income, 3000);
    assert_eq!(
        store.get(LAST_SNAPSHOT_MONTH_KEY).unwrap().as_deref(),
        Some("2025-06")
    );

    let comparison = next_month.latest_comparison().expect("two snapshots");
    assert_eq!(comparison.income_change, 3000);
    assert_eq!(comparison.income_change_pct, 0.0);
}

#[test]
fn snapshot_on_change_keeps_the_current_month_fresh() {
    let store = Arc::new(MemoryStore::new());
    let config = Config {
        snapshot_on_change: true,
        ..Config::default()
    };

    let mut manager = open_with_config(&store, clock_on(2025, 7, 10), config);
    manager.set_income("2000").unwrap();
    manager.add_expense(TierId::Survival, "Rent", "1200").unwrap();

    assert_eq!(manager.history().len(), 1);
    let latest = &manager.history()[0];
    assert_eq!(latest.income, 2000);
    assert_eq!(latest.total_spending, 1200);
    assert_eq!(latest.money_left, 800);
    assert!(latest.survival_covered);
}
