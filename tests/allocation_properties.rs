mod common;

use std::collections::HashSet;

use common::{clock_on, tiers_with_totals};
use proptest::prelude::*;
use tiered_budget::{
    core::services::{AllocationService, SnapshotService, MAX_SNAPSHOT_HISTORY},
    domain::{Affordability, ExpenseItem, Tier},
    utils::{format_dollars, sanitize_amount},
};

fn states(income: u64, tiers: &[Tier]) -> Vec<Affordability> {
    AllocationService::allocate(income, tiers)
        .iter()
        .map(Tier::affordability)
        .collect()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_every_step_follows_the_classification_rules(
        income in 0u64..20_000,
        totals in proptest::array::uniform4(0u64..6_000),
    ) {
        let report = AllocationService::report(income, &tiers_with_totals(totals));
        let mut carried = income;
        for step in &report.steps {
            prop_assert_eq!(step.remaining_before, carried);
            match step.affordability {
                Affordability::Affordable => {
                    prop_assert!(step.remaining_before >= step.total);
                    prop_assert_eq!(step.remaining_after, step.remaining_before - step.total);
                }
                Affordability::Borderline => {
                    prop_assert!(step.remaining_before < step.total);
                    prop_assert!(step.remaining_before > 0);
                    prop_assert!(step.remaining_before * 2 >= step.total);
                    prop_assert_eq!(step.remaining_after, 0);
                }
                Affordability::NotAffordable => {
                    prop_assert!(step.remaining_before * 2 < step.total || step.remaining_before == 0);
                    prop_assert_eq!(step.remaining_after, step.remaining_before);
                }
            }
            prop_assert!(step.remaining_after <= step.remaining_before);
            carried = step.remaining_after;
        }
        prop_assert_eq!(report.remaining, carried);
        prop_assert!(report.remaining <= income);
    }

    #[test]
    fn prop_empty_tiers_are_always_affordable(
        income in 0u64..5_000,
        totals in proptest::array::uniform4(prop_oneof![Just(0u64), 1u64..8_000]),
    ) {
        let allocated = AllocationService::allocate(income, &tiers_with_totals(totals));
        for (tier, total) in allocated.iter().zip(totals) {
            if total == 0 {
                prop_assert!(tier.is_affordable());
            }
        }
    }

    #[test]
    fn prop_disabled_expenses_never_change_the_outcome(
        income in 0u64..10_000,
        totals in proptest::array::uniform4(0u64..4_000),
        hidden in 1u64..50_000,
        target in 0usize..4,
    ) {
        let baseline = tiers_with_totals(totals);
        let mut padded = baseline.clone();
        padded[target]
            .expenses
            .push(ExpenseItem::new("Paused", hidden).disabled());

        prop_assert_eq!(states(income, &baseline), states(income, &padded));
    }

    #[test]
    fn prop_input_order_does_not_matter(
        income in 0u64..10_000,
        totals in proptest::array::uniform4(0u64..4_000),
    ) {
        let ordered = tiers_with_totals(totals);
        let mut reversed = ordered.clone();
        reversed.reverse();
        prop_assert_eq!(
            AllocationService::allocate(income, &ordered),
            AllocationService::allocate(income, &reversed)
        );
    }

    #[test]
    fn prop_survival_never_gets_worse_with_more_income(
        income in 0u64..10_000,
        raise in 0u64..10_000,
        totals in proptest::array::uniform4(0u64..6_000),
    ) {
        let tiers = tiers_with_totals(totals);
        let before = states(income, &tiers)[0];
        let after = states(income + raise, &tiers)[0];
        prop_assert!(after.rank() >= before.rank());
    }

    #[test]
    fn prop_history_keeps_one_entry_per_month_and_stays_capped(
        months in proptest::collection::vec(0u32..60, 1..40),
    ) {
        let tiers = tiers_with_totals([100, 0, 0, 0]);
        let mut history = Vec::new();
        for index in &months {
            let clock = clock_on(2020 + (*index / 12) as i32, *index % 12 + 1, 1);
            let snapshot = SnapshotService::create_snapshot(1_000, &tiers, &clock);
            history = SnapshotService::add_snapshot(snapshot, history);
        }

        prop_assert!(history.len() <= MAX_SNAPSHOT_HISTORY);
        let unique: HashSet<&str> = history.iter().map(|entry| entry.date.as_str()).collect();
        prop_assert_eq!(unique.len(), history.len());
        prop_assert!(history.windows(2).all(|pair| pair[0].timestamp > pair[1].timestamp));

        let distinct: HashSet<u32> = months.iter().copied().collect();
        prop_assert_eq!(history.len(), distinct.len().min(MAX_SNAPSHOT_HISTORY));
    }

    #[test]
    fn prop_formatted_dollars_sanitize_back_to_the_amount(
        amount in 0u64..1_000_000_000_000,
        cents in 0u32..100,
    ) {
        let raw = format!("{}.{:02}", format_dollars(amount), cents);
        prop_assert_eq!(sanitize_amount(&raw), amount);
    }
}
