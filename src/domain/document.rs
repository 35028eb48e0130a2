//! Whole-budget documents stored under the budget blob key, in their legacy
//! and current shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common;
use super::expense::{ExpenseCategory, ExpenseItem};
use super::income::IncomeSource;
use super::tier::{Tier, TierId};
use super::totals::BudgetTotals;

pub const CURRENT_DOCUMENT_VERSION: u32 = 2;

fn enabled_by_default() -> bool {
    true
}

/// Expense in the current document shape; carries its tier explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedExpense {
    pub id: String,
    pub name: String,
    pub amount: u64,
    pub enabled: bool,
    pub category: ExpenseCategory,
    pub priority: TierId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_goal_id: Option<String>,
}

impl CategorizedExpense {
    pub fn to_item(&self) -> ExpenseItem {
        ExpenseItem {
            id: self.id.clone(),
            name: self.name.clone(),
            amount: self.amount,
            enabled: self.enabled,
            category: Some(self.category),
            savings_goal_id: self.savings_goal_id.clone(),
        }
    }
}

/// Versioned budget document written after migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDocument {
    pub version: u32,
    #[serde(default)]
    pub income_sources: Vec<IncomeSource>,
    #[serde(default)]
    pub expenses: Vec<CategorizedExpense>,
    #[serde(default)]
    pub totals: BudgetTotals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrated_at: Option<DateTime<Utc>>,
}

impl BudgetDocument {
    /// Regroups the flat expense list into the four tiers, preserving item order.
    pub fn tiers(&self) -> Vec<Tier> {
        let mut tiers = Tier::defaults();
        for expense in &self.expenses {
            if let Some(tier) = tiers.iter_mut().find(|tier| tier.id == expense.priority) {
                tier.expenses.push(expense.to_item());
            }
        }
        tiers
    }

    pub fn income(&self) -> u64 {
        self.totals.income
    }
}

/// Single-income, four-tier shape written by older clients.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyBudget {
    #[serde(deserialize_with = "common::whole_dollars::deserialize")]
    pub income: u64,
    #[serde(default)]
    pub priorities: Vec<LegacyPriority>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyPriority {
    pub id: u8,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub expenses: Vec<LegacyExpense>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyExpense {
    #[serde(
        default = "common::new_id",
        deserialize_with = "common::flexible_id::deserialize"
    )]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "common::whole_dollars::deserialize")]
    pub amount: u64,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}
