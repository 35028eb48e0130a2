use serde::{Deserialize, Serialize};

use super::tier::{Affordability, TierId};

/// Step record for one tier in an allocation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierAllocation {
    pub id: TierId,
    pub total: u64,
    pub remaining_before: u64,
    pub remaining_after: u64,
    pub affordability: Affordability,
}

/// Full trace of an allocation pass in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationReport {
    pub income: u64,
    pub steps: Vec<TierAllocation>,
    pub remaining: u64,
}

impl AllocationReport {
    pub fn step(&self, id: TierId) -> Option<&TierAllocation> {
        self.steps.iter().find(|step| step.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierTotal {
    pub id: TierId,
    pub total: u64,
}

/// Aggregate figures derived from income and the enabled expenses of every tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTotals {
    pub income: u64,
    #[serde(default)]
    pub tier_totals: Vec<TierTotal>,
    pub total_spending: u64,
    pub essential_expenses: u64,
    /// Income left once Survival and Important are paid; negative values are a gap.
    pub flexible_money: i64,
    pub money_left: i64,
    pub survival_covered: bool,
}

impl BudgetTotals {
    pub fn tier_total(&self, id: TierId) -> u64 {
        self.tier_totals
            .iter()
            .find(|entry| entry.id == id)
            .map_or(0, |entry| entry.total)
    }
}
