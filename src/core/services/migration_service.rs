use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use super::allocation_service::AllocationService;
use crate::domain::{
    BudgetDocument, CategorizedExpense, ExpenseCategory, IncomeConfidence,
    IncomeFrequency, IncomeSource, LegacyBudget, TierId, CURRENT_DOCUMENT_VERSION,
};

const PRIMARY_INCOME_NAME: &str = "Primary income";

/// Keyword precedence for categorising legacy expense names. The first row with a
/// keyword found in the lower-cased name wins.
const CATEGORY_KEYWORDS: &[(&[&str], ExpenseCategory)] = &[
    (&["rent", "mortgage", "housing", "hoa"], ExpenseCategory::Housing),
    (&["insurance"], ExpenseCategory::Insurance),
    (&["childcare", "child care", "daycare", "babysit"], ExpenseCategory::Childcare),
    (&["debt", "loan", "credit"], ExpenseCategory::DebtPayments),
    (
        &["electric", "utility", "utilities", "water", "heating", "gas bill", "power"],
        ExpenseCategory::Utilities,
    ),
    (&["phone", "internet", "mobile", "wifi", "cell"], ExpenseCategory::PhoneInternet),
    (
        &["dining", "restaurant", "takeout", "eating out", "fast food"],
        ExpenseCategory::DiningOut,
    ),
    (&["food", "grocer"], ExpenseCategory::Food),
    (
        &["medical", "medicare", "health", "doctor", "pharmacy", "prescription", "dental"],
        ExpenseCategory::Healthcare,
    ),
    (
        &["car", "transport", "fuel", "gas", "transit", "bus", "parking", "commute"],
        ExpenseCategory::Transportation,
    ),
    (
        &["subscription", "netflix", "spotify", "streaming"],
        ExpenseCategory::Subscriptions,
    ),
    (
        &["entertainment", "movie", "hobby", "hobbies", "concert", "games"],
        ExpenseCategory::Entertainment,
    ),
    (
        &["gym", "fitness", "haircut", "skincare", "personal"],
        ExpenseCategory::PersonalCare,
    ),
    (&["emergency"], ExpenseCategory::EmergencyFund),
    (&["retirement", "401k", "ira", "pension"], ExpenseCategory::Retirement),
    (&["invest", "brokerage", "stock"], ExpenseCategory::Investments),
    (&["saving"], ExpenseCategory::Savings),
];

/// Short keywords that only match as a whole word ("car" but not "skincare").
const WHOLE_WORD_KEYWORDS: &[&str] = &["car", "bus", "gas", "ira", "hoa"];

/// Result of inspecting a stored budget blob.
#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    /// The blob had the legacy shape and was converted.
    Migrated(BudgetDocument),
    /// The blob already carries a `version` field; nothing was transformed.
    Current(BudgetDocument),
    /// Neither shape matched.
    Unrecognized,
}

/// One-way conversion of the single-income, four-tier layout into a
/// [`BudgetDocument`].
pub struct MigrationService;

impl MigrationService {
    /// Structural signature of the legacy shape: numeric `income`, array `priorities`,
    /// and no `version`.
    pub fn is_legacy(value: &Value) -> bool {
        let Some(object) = value.as_object() else {
            return false;
        };
        !object.contains_key("version")
            && object.get("income").is_some_and(Value::is_number)
            && object.get("priorities").is_some_and(Value::is_array)
    }

    pub fn categorize(name: &str, tier: TierId) -> ExpenseCategory {
        let name = name.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(keywords, _)| {
                keywords
                    .iter()
                    .any(|keyword| keyword_matches(&name, keyword))
            })
            .map(|(_, category)| *category)
            .unwrap_or_else(|| ExpenseCategory::fallback_for(tier))
    }

    pub fn migrate(legacy: &LegacyBudget, migrated_at: DateTime<Utc>) -> BudgetDocument {
        let income_source = IncomeSource::new(
            PRIMARY_INCOME_NAME,
            legacy.income,
            IncomeFrequency::Monthly,
            IncomeConfidence::Certain,
        );

        let mut priorities: Vec<_> = legacy.priorities.iter().collect();
        priorities.sort_by_key(|priority| priority.id);

        let mut expenses = Vec::new();
        for priority in priorities {
            let Ok(tier) = TierId::try_from(priority.id) else {
                debug!(id = priority.id, "skipping legacy priority with unknown id");
                continue;
            };
            expenses.extend(priority.expenses.iter().map(|expense| CategorizedExpense {
                id: expense.id.clone(),
                name: expense.name.clone(),
                amount: expense.amount,
                enabled: expense.enabled,
                category: Self::categorize(&expense.name, tier),
                priority: tier,
                savings_goal_id: None,
            }));
        }

        let mut document = BudgetDocument {
            version: CURRENT_DOCUMENT_VERSION,
            income_sources: vec![income_source],
            expenses,
            totals: Default::default(),
            migrated_at: Some(migrated_at),
        };
        document.totals = AllocationService::totals(legacy.income, &document.tiers());
        info!(
            expenses = document.expenses.len(),
            income = legacy.income,
            "migrated legacy budget document"
        );
        document
    }

    /// Inspects a stored blob and converts it when it has the legacy shape.
    /// Documents that already carry a `version` are returned untouched.
    pub fn migrate_value(value: &Value, migrated_at: DateTime<Utc>) -> MigrationOutcome {
        if value.get("version").is_some() {
            return match serde_json::from_value::<BudgetDocument>(value.clone()) {
                Ok(document) => MigrationOutcome::Current(document),
                Err(err) => {
                    debug!(error = %err, "versioned budget document is malformed");
                    MigrationOutcome::Unrecognized
                }
            };
        }
        if !Self::is_legacy(value) {
            return MigrationOutcome::Unrecognized;
        }
        match serde_json::from_value::<LegacyBudget>(value.clone()) {
            Ok(legacy) => MigrationOutcome::Migrated(Self::migrate(&legacy, migrated_at)),
            Err(err) => {
                debug!(error = %err, "legacy budget document is malformed");
                MigrationOutcome::Unrecognized
            }
        }
    }
}

fn keyword_matches(name: &str, keyword: &str) -> bool {
    if WHOLE_WORD_KEYWORDS.contains(&keyword) {
        name.split(|c: char| !c.is_alphanumeric())
            .any(|word| word == keyword)
    } else {
        name.contains(keyword)
    }
}
