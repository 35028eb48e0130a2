use tracing::debug;

use crate::domain::{
    Affordability, AllocationReport, BudgetTotals, Tier, TierAllocation, TierId, TierTotal,
};

/// Greedy, priority-ordered allocation of income across tiers.
pub struct AllocationService;

impl AllocationService {
    /// Classifies a single tier against the income still available to it and returns
    /// the income left afterwards.
    ///
    /// A borderline tier (at least half covered) consumes everything that remains.
    pub fn classify(remaining: u64, total: u64) -> (Affordability, u64) {
        if remaining >= total {
            (Affordability::Affordable, remaining - total)
        } else if remaining > 0 && remaining.saturating_mul(2) >= total {
            (Affordability::Borderline, 0)
        } else {
            (Affordability::NotAffordable, remaining)
        }
    }

    /// Runs the allocation pass in ascending tier id order.
    pub fn report(income: u64, tiers: &[Tier]) -> AllocationReport {
        let mut ordered: Vec<&Tier> = tiers.iter().collect();
        ordered.sort_by_key(|tier| tier.id);

        let mut remaining = income;
        let steps = ordered
            .into_iter()
            .map(|tier| {
                let total = tier.enabled_total();
                let (affordability, after) = Self::classify(remaining, total);
                let step = TierAllocation {
                    id: tier.id,
                    total,
                    remaining_before: remaining,
                    remaining_after: after,
                    affordability,
                };
                remaining = after;
                step
            })
            .collect();

        AllocationReport {
            income,
            steps,
            remaining,
        }
    }

    /// Returns the tiers, in priority order, with their affordability re-derived.
    pub fn allocate(income: u64, tiers: &[Tier]) -> Vec<Tier> {
        let report = Self::report(income, tiers);
        let mut allocated: Vec<Tier> = tiers.to_vec();
        allocated.sort_by_key(|tier| tier.id);
        for (tier, step) in allocated.iter_mut().zip(&report.steps) {
            tier.set_affordability(step.affordability);
        }
        debug!(
            income,
            remaining = report.remaining,
            "allocated income across {} tiers",
            allocated.len()
        );
        allocated
    }

    /// Aggregate totals for the presentation layer and for gap messaging.
    pub fn totals(income: u64, tiers: &[Tier]) -> BudgetTotals {
        let report = Self::report(income, tiers);
        let tier_totals: Vec<TierTotal> = report
            .steps
            .iter()
            .map(|step| TierTotal {
                id: step.id,
                total: step.total,
            })
            .collect();
        let total_spending = sum(tier_totals.iter().map(|entry| entry.total));
        let essential_expenses = sum(
            tier_totals
                .iter()
                .filter(|entry| entry.id.is_essential())
                .map(|entry| entry.total),
        );
        let survival_covered = report
            .step(TierId::Survival)
            .is_some_and(|step| step.affordability == Affordability::Affordable);

        BudgetTotals {
            income,
            tier_totals,
            total_spending,
            essential_expenses,
            flexible_money: signed_difference(income, essential_expenses),
            money_left: signed_difference(income, total_spending),
            survival_covered,
        }
    }
}

fn sum(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0u64, u64::saturating_add)
}

/// `a - b` as a signed value, saturating at the `i64` bounds.
pub(crate) fn signed_difference(a: u64, b: u64) -> i64 {
    let diff = i128::from(a) - i128::from(b);
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
