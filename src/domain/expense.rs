//! Expense line items and the categories they can be filed under.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::common::{self, Identifiable, NamedEntity};
use super::tier::TierId;
use crate::errors::BudgetError;

/// Spending categories used by categorised budget documents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Housing,
    Utilities,
    Food,
    Transportation,
    Insurance,
    Healthcare,
    DebtPayments,
    PhoneInternet,
    Childcare,
    Subscriptions,
    DiningOut,
    Entertainment,
    PersonalCare,
    EmergencyFund,
    Retirement,
    Investments,
    /// Contribution towards a user-defined savings goal; needs a linked goal id.
    SavingsGoal,
    Essentials,
    Bills,
    Lifestyle,
    Savings,
}

impl ExpenseCategory {
    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "Housing",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::DebtPayments => "Debt Payments",
            ExpenseCategory::PhoneInternet => "Phone & Internet",
            ExpenseCategory::Childcare => "Childcare",
            ExpenseCategory::Subscriptions => "Subscriptions",
            ExpenseCategory::DiningOut => "Dining Out",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::PersonalCare => "Personal Care",
            ExpenseCategory::EmergencyFund => "Emergency Fund",
            ExpenseCategory::Retirement => "Retirement",
            ExpenseCategory::Investments => "Investments",
            ExpenseCategory::SavingsGoal => "Savings Goal",
            ExpenseCategory::Essentials => "Other Essentials",
            ExpenseCategory::Bills => "Other Bills",
            ExpenseCategory::Lifestyle => "Lifestyle",
            ExpenseCategory::Savings => "Savings",
        }
    }

    pub fn requires_savings_goal(self) -> bool {
        matches!(self, ExpenseCategory::SavingsGoal)
    }

    /// Category assumed for an expense in `tier` when nothing more specific is known.
    pub fn fallback_for(tier: TierId) -> Self {
        match tier {
            TierId::Survival => ExpenseCategory::Essentials,
            TierId::Important => ExpenseCategory::Bills,
            TierId::QualityOfLife => ExpenseCategory::Lifestyle,
            TierId::FutureBuilding => ExpenseCategory::Savings,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn enabled_by_default() -> bool {
    true
}

/// A single amount-bearing line within a tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    #[serde(
        default = "common::new_id",
        deserialize_with = "common::flexible_id::deserialize"
    )]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "common::whole_dollars::deserialize")]
    pub amount: u64,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_goal_id: Option<String>,
}

impl ExpenseItem {
    pub fn new(name: impl Into<String>, amount: u64) -> Self {
        Self {
            id: common::new_id(),
            name: name.into(),
            amount,
            enabled: true,
            category: None,
            savings_goal_id: None,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Amount this item contributes to its tier; disabled items contribute nothing.
    pub fn counted_amount(&self) -> u64 {
        if self.enabled {
            self.amount
        } else {
            0
        }
    }

    /// Checks the linkage rules enforced before a user edit is saved.
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.name.trim().is_empty() {
            return Err(BudgetError::Validation("expense name is required".into()));
        }
        if let Some(category) = self.category {
            let linked = self
                .savings_goal_id
                .as_deref()
                .is_some_and(|goal| !goal.trim().is_empty());
            if category.requires_savings_goal() && !linked {
                return Err(BudgetError::Validation(format!(
                    "expense `{}` is filed under {} but has no linked savings goal",
                    self.name, category
                )));
            }
        }
        Ok(())
    }
}

impl Identifiable for ExpenseItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for ExpenseItem {
    fn name(&self) -> &str {
        &self.name
    }
}
