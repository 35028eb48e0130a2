//! The four fixed priority tiers and their derived affordability.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::common::NamedEntity;
use super::expense::ExpenseItem;
use crate::errors::BudgetError;

/// Identity of a priority tier. Ordering by id is the allocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TierId {
    Survival = 1,
    Important = 2,
    QualityOfLife = 3,
    FutureBuilding = 4,
}

impl TierId {
    pub const ALL: [TierId; 4] = [
        TierId::Survival,
        TierId::Important,
        TierId::QualityOfLife,
        TierId::FutureBuilding,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn default_name(self) -> &'static str {
        match self {
            TierId::Survival => "Survival",
            TierId::Important => "Important",
            TierId::QualityOfLife => "Quality of Life",
            TierId::FutureBuilding => "Future Building",
        }
    }

    /// Survival and Important together form the essentials.
    pub fn is_essential(self) -> bool {
        matches!(self, TierId::Survival | TierId::Important)
    }
}

impl TryFrom<u8> for TierId {
    type Error = BudgetError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TierId::Survival),
            2 => Ok(TierId::Important),
            3 => Ok(TierId::QualityOfLife),
            4 => Ok(TierId::FutureBuilding),
            other => Err(BudgetError::TierNotFound(other)),
        }
    }
}

impl From<TierId> for u8 {
    fn from(value: TierId) -> Self {
        value.as_u8()
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Outcome of allocating income to a tier. Exactly one holds per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordability {
    Affordable,
    Borderline,
    NotAffordable,
}

impl Affordability {
    /// Rank used to compare classifications; higher is better.
    pub fn rank(self) -> u8 {
        match self {
            Affordability::NotAffordable => 0,
            Affordability::Borderline => 1,
            Affordability::Affordable => 2,
        }
    }
}

/// A priority tier and its expenses.
///
/// `is_affordable` / `is_borderline` are persisted for the presentation layer but are
/// only ever written by the allocation engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub id: TierId,
    pub name: String,
    #[serde(default)]
    pub expenses: Vec<ExpenseItem>,
    #[serde(default)]
    is_affordable: bool,
    #[serde(default)]
    is_borderline: bool,
}

impl Tier {
    pub fn new(id: TierId) -> Self {
        Self {
            id,
            name: id.default_name().to_string(),
            expenses: Vec::new(),
            is_affordable: false,
            is_borderline: false,
        }
    }

    /// The four fixed tiers, empty, in priority order.
    pub fn defaults() -> Vec<Tier> {
        TierId::ALL.into_iter().map(Tier::new).collect()
    }

    pub fn with_expense(mut self, expense: ExpenseItem) -> Self {
        self.expenses.push(expense);
        self
    }

    /// Sum of enabled expense amounts.
    pub fn enabled_total(&self) -> u64 {
        self.expenses
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.counted_amount()))
    }

    pub fn active_count(&self) -> usize {
        self.expenses.iter().filter(|item| item.enabled).count()
    }

    pub fn is_affordable(&self) -> bool {
        self.is_affordable
    }

    pub fn is_borderline(&self) -> bool {
        self.is_borderline
    }

    pub fn affordability(&self) -> Affordability {
        if self.is_affordable {
            Affordability::Affordable
        } else if self.is_borderline {
            Affordability::Borderline
        } else {
            Affordability::NotAffordable
        }
    }

    pub(crate) fn set_affordability(&mut self, affordability: Affordability) {
        self.is_affordable = affordability == Affordability::Affordable;
        self.is_borderline = affordability == Affordability::Borderline;
    }
}

impl NamedEntity for Tier {
    fn name(&self) -> &str {
        &self.name
    }
}
