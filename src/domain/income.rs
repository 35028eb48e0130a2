//! Income streams and the scenario figures derived from them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{self, Identifiable, NamedEntity};

/// How often an income source pays out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum IncomeFrequency {
    Monthly,
    BiWeekly,
    Weekly,
    /// Amount is already a monthly average entered by the user.
    Irregular,
}

impl IncomeFrequency {
    /// Converts a per-payment amount into its monthly equivalent.
    pub fn monthly_equivalent(self, amount: u64) -> f64 {
        let amount = amount as f64;
        match self {
            IncomeFrequency::Monthly | IncomeFrequency::Irregular => amount,
            IncomeFrequency::BiWeekly => amount * 26.0 / 12.0,
            IncomeFrequency::Weekly => amount * 52.0 / 12.0,
        }
    }
}

/// How sure the user is that a source will pay out as entered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IncomeConfidence {
    Certain,
    Likely,
    Uncertain,
}

impl IncomeConfidence {
    pub fn multiplier(self, scenario: IncomeScenario) -> f64 {
        use IncomeConfidence::*;
        use IncomeScenario::*;
        match (self, scenario) {
            (Certain, _) => 1.0,
            (Likely, Conservative) => 0.85,
            (Likely, Typical) => 0.95,
            (Likely, Optimistic) => 1.0,
            (Uncertain, Conservative) => 0.60,
            (Uncertain, Typical) => 0.75,
            (Uncertain, Optimistic) => 0.90,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IncomeScenario {
    Conservative,
    Typical,
    Optimistic,
}

impl IncomeScenario {
    pub const ALL: [IncomeScenario; 3] = [
        IncomeScenario::Conservative,
        IncomeScenario::Typical,
        IncomeScenario::Optimistic,
    ];
}

impl fmt::Display for IncomeScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IncomeScenario::Conservative => "conservative",
            IncomeScenario::Typical => "typical",
            IncomeScenario::Optimistic => "optimistic",
        };
        f.write_str(label)
    }
}

/// Window during which a source pays out; `end` is exclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveDates {
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl ActiveDates {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.map_or(true, |end| date < end)
    }
}

/// One income stream entered by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeSource {
    #[serde(
        default = "common::new_id",
        deserialize_with = "common::flexible_id::deserialize"
    )]
    pub id: String,
    pub source_name: String,
    #[serde(deserialize_with = "common::whole_dollars::deserialize")]
    pub amount: u64,
    pub frequency: IncomeFrequency,
    pub confidence: IncomeConfidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_dates: Option<ActiveDates>,
}

impl IncomeSource {
    pub fn new(
        source_name: impl Into<String>,
        amount: u64,
        frequency: IncomeFrequency,
        confidence: IncomeConfidence,
    ) -> Self {
        Self {
            id: common::new_id(),
            source_name: source_name.into(),
            amount,
            frequency,
            confidence,
            active_dates: None,
        }
    }

    pub fn with_active_dates(mut self, start: NaiveDate, end: Option<NaiveDate>) -> Self {
        self.active_dates = Some(ActiveDates { start, end });
        self
    }

    /// Sources without an active window always count.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.active_dates
            .as_ref()
            .map_or(true, |window| window.contains(date))
    }

    pub fn monthly_amount(&self) -> f64 {
        self.frequency.monthly_equivalent(self.amount)
    }
}

impl Identifiable for IncomeSource {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for IncomeSource {
    fn name(&self) -> &str {
        &self.source_name
    }
}

/// Per-source contribution to each scenario, before flooring.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBreakdown {
    pub source_id: String,
    pub source_name: String,
    pub monthly_amount: f64,
    pub conservative: f64,
    pub typical: f64,
    pub optimistic: f64,
}

/// Monthly income under each scenario, floored to whole dollars.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeScenarios {
    pub conservative: u64,
    pub typical: u64,
    pub optimistic: u64,
    pub breakdown: Vec<IncomeBreakdown>,
}

impl IncomeScenarios {
    pub fn value(&self, scenario: IncomeScenario) -> u64 {
        match scenario {
            IncomeScenario::Conservative => self.conservative,
            IncomeScenario::Typical => self.typical,
            IncomeScenario::Optimistic => self.optimistic,
        }
    }
}
