//! Monthly history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tier::TierId;

/// Summary of one tier at the time a snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritySnapshot {
    pub id: TierId,
    pub name: String,
    pub total_expenses: u64,
    pub active_expenses: usize,
    pub expense_count: usize,
    pub is_affordable: bool,
    pub is_borderline: bool,
}

/// Recorded budget state for one calendar month (`date` is `YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
    pub id: String,
    pub date: String,
    pub timestamp: DateTime<Utc>,
    pub income: u64,
    pub priorities: Vec<PrioritySnapshot>,
    pub total_spending: u64,
    pub money_left: i64,
    pub survival_covered: bool,
}

/// Changes between two snapshots; percentages are relative to the earlier one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotComparison {
    pub income_change: i64,
    pub spending_change: i64,
    pub money_left_change: i64,
    pub income_change_pct: f64,
    pub spending_change_pct: f64,
    pub money_left_change_pct: f64,
}
