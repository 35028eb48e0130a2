pub mod common;
pub mod document;
pub mod expense;
pub mod income;
pub mod snapshot;
pub mod tier;
pub mod totals;

pub use common::{new_id, Identifiable, NamedEntity};
pub use document::{
    BudgetDocument, CategorizedExpense, LegacyBudget, LegacyExpense, LegacyPriority,
    CURRENT_DOCUMENT_VERSION,
};
pub use expense::{ExpenseCategory, ExpenseItem};
pub use income::{
    ActiveDates, IncomeBreakdown, IncomeConfidence, IncomeFrequency, IncomeScenario,
    IncomeScenarios, IncomeSource,
};
pub use snapshot::{BudgetSnapshot, PrioritySnapshot, SnapshotComparison};
pub use tier::{Affordability, Tier, TierId};
pub use totals::{AllocationReport, BudgetTotals, TierAllocation, TierTotal};
