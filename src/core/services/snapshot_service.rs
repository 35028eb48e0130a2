use std::cmp::Reverse;

use chrono::NaiveDate;

use super::allocation_service::{signed_difference, AllocationService};
use crate::core::time::{month_key, Clock};
use crate::domain::{
    new_id, BudgetSnapshot, PrioritySnapshot, SnapshotComparison, Tier, TierId,
};

/// Number of monthly snapshots retained in history.
pub const MAX_SNAPSHOT_HISTORY: usize = 12;

/// Monthly history bookkeeping.
pub struct SnapshotService;

impl SnapshotService {
    /// A snapshot is due when none was ever recorded or the last one belongs to
    /// another calendar month.
    pub fn should_create_snapshot(last_snapshot_month: Option<&str>, today: NaiveDate) -> bool {
        match last_snapshot_month {
            Some(month) => month != month_key(today),
            None => true,
        }
    }

    /// Builds the record for the clock's current month. Affordability is re-derived
    /// from `income` rather than trusted from the tiers passed in.
    pub fn create_snapshot(income: u64, tiers: &[Tier], clock: &dyn Clock) -> BudgetSnapshot {
        let tiers = AllocationService::allocate(income, tiers);
        let priorities: Vec<PrioritySnapshot> = tiers
            .iter()
            .map(|tier| PrioritySnapshot {
                id: tier.id,
                name: tier.name.clone(),
                total_expenses: tier.enabled_total(),
                active_expenses: tier.active_count(),
                expense_count: tier.expenses.len(),
                is_affordable: tier.is_affordable(),
                is_borderline: tier.is_borderline(),
            })
            .collect();
        let total_spending = priorities
            .iter()
            .fold(0u64, |acc, entry| acc.saturating_add(entry.total_expenses));
        let survival_covered = priorities
            .iter()
            .find(|entry| entry.id == TierId::Survival)
            .is_some_and(|entry| entry.is_affordable);

        BudgetSnapshot {
            id: new_id(),
            date: month_key(clock.today()),
            timestamp: clock.now(),
            income,
            priorities,
            total_spending,
            money_left: signed_difference(income, total_spending),
            survival_covered,
        }
    }

    /// Inserts `snapshot`, replacing any entry for the same month, then keeps the
    /// most recent [`MAX_SNAPSHOT_HISTORY`] entries, newest first.
    pub fn add_snapshot(
        snapshot: BudgetSnapshot,
        mut history: Vec<BudgetSnapshot>,
    ) -> Vec<BudgetSnapshot> {
        match history.iter_mut().find(|entry| entry.date == snapshot.date) {
            Some(existing) => *existing = snapshot,
            None => history.push(snapshot),
        }
        history.sort_by_key(|entry| Reverse(entry.timestamp));
        history.truncate(MAX_SNAPSHOT_HISTORY);
        history
    }

    pub fn compare_snapshots(
        current: &BudgetSnapshot,
        previous: Option<&BudgetSnapshot>,
    ) -> SnapshotComparison {
        let Some(previous) = previous else {
            return SnapshotComparison::default();
        };

        let income_change = signed_difference(current.income, previous.income);
        let spending_change = signed_difference(current.total_spending, previous.total_spending);
        let money_left_change = current.money_left.saturating_sub(previous.money_left);

        SnapshotComparison {
            income_change,
            spending_change,
            money_left_change,
            income_change_pct: percent_change(income_change, previous.income),
            spending_change_pct: percent_change(spending_change, previous.total_spending),
            money_left_change_pct: percent_change(
                money_left_change,
                previous.money_left.unsigned_abs(),
            ),
        }
    }
}

fn percent_change(change: i64, base: u64) -> f64 {
    if base == 0 {
        return 0.0;
    }
    change as f64 / base as f64 * 100.0
}
