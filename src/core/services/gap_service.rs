use serde::Serialize;

use crate::utils::format_dollars;

const MINOR_GAP_LIMIT: u64 = 50;
const MODERATE_GAP_LIMIT: u64 = 200;
const SEVERE_GAP_PERCENT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GapSeverity {
    None,
    Minor,
    Moderate,
    Significant,
    Severe,
}

/// Presentation framing for the money left (or missing) after essentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapMessage {
    pub label: String,
    pub description: String,
    pub severity: GapSeverity,
    pub show_help: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_suggestions: Option<Vec<String>>,
}

pub struct GapService;

impl GapService {
    /// Buckets a signed gap (income minus essentials) by severity.
    pub fn severity(gap_amount: i64, total_income: i64) -> GapSeverity {
        if gap_amount >= 0 {
            return GapSeverity::None;
        }
        if total_income <= 0 {
            return GapSeverity::Severe;
        }
        let shortfall = gap_amount.unsigned_abs();
        if shortfall <= MINOR_GAP_LIMIT {
            GapSeverity::Minor
        } else if shortfall <= MODERATE_GAP_LIMIT {
            GapSeverity::Moderate
        } else if gap_percentage(shortfall, total_income) < SEVERE_GAP_PERCENT {
            GapSeverity::Significant
        } else {
            GapSeverity::Severe
        }
    }

    pub fn classify(gap_amount: i64, total_income: i64) -> GapMessage {
        let severity = Self::severity(gap_amount, total_income);
        let amount = format_dollars(gap_amount.unsigned_abs());
        let (label, description, suggestions): (&str, String, Vec<&str>) = match severity {
            GapSeverity::None => (
                "Essentials covered",
                format!("You have {amount} left each month after your essentials."),
                Vec::new(),
            ),
            GapSeverity::Minor => (
                "Almost there",
                format!("Your essentials are {amount} more than your income. A small tweak closes this gap."),
                vec![
                    "Trim one flexible expense this month",
                    "Check for a bill you can lower or pause",
                ],
            ),
            GapSeverity::Moderate => (
                "A manageable gap",
                format!("Your essentials are {amount} more than your income each month."),
                vec![
                    "Review subscriptions and memberships",
                    "Cut back on groceries or dining out",
                    "Pick up a few extra hours or a side job",
                ],
            ),
            GapSeverity::Significant => (
                "A significant gap",
                format!("You are {amount} short on essentials each month. It is worth getting support."),
                vec![
                    "Call creditors to ask about payment plans",
                    "Check eligibility for assistance programs",
                    "Negotiate housing or utility costs",
                    "Look into additional income sources",
                ],
            ),
            GapSeverity::Severe => (
                "A serious shortfall",
                format!("Your essentials are {amount} more than you bring in. You are not alone, and help is available."),
                vec![
                    "Contact a local assistance line such as 211",
                    "Protect housing, utilities and food first",
                    "Ask creditors to pause or reduce payments",
                    "Talk with a nonprofit financial counselor",
                ],
            ),
        };

        GapMessage {
            label: label.to_string(),
            description,
            severity,
            show_help: matches!(severity, GapSeverity::Significant | GapSeverity::Severe),
            action_suggestions: if suggestions.is_empty() {
                None
            } else {
                Some(suggestions.into_iter().map(String::from).collect())
            },
        }
    }
}

fn gap_percentage(shortfall: u64, total_income: i64) -> f64 {
    if total_income <= 0 {
        return 100.0;
    }
    shortfall as f64 / total_income as f64 * 100.0
}
