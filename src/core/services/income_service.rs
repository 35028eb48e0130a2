use chrono::NaiveDate;

use crate::domain::{
    IncomeBreakdown, IncomeConfidence, IncomeFrequency, IncomeScenario, IncomeScenarios,
    IncomeSource,
};

/// Normalises income sources into monthly scenario figures.
pub struct IncomeService;

impl IncomeService {
    /// Monthly income under each scenario for the sources active on `reference`.
    pub fn monthly_income(sources: &[IncomeSource], reference: NaiveDate) -> IncomeScenarios {
        let breakdown: Vec<IncomeBreakdown> = sources
            .iter()
            .filter(|source| source.is_active_on(reference))
            .map(|source| {
                let monthly = source.monthly_amount();
                let adjusted =
                    |scenario| monthly * source.confidence.multiplier(scenario);
                IncomeBreakdown {
                    source_id: source.id.clone(),
                    source_name: source.source_name.clone(),
                    monthly_amount: monthly,
                    conservative: adjusted(IncomeScenario::Conservative),
                    typical: adjusted(IncomeScenario::Typical),
                    optimistic: adjusted(IncomeScenario::Optimistic),
                }
            })
            .collect();

        let floor_sum = |pick: fn(&IncomeBreakdown) -> f64| {
            let total: f64 = breakdown.iter().map(pick).sum();
            total.max(0.0).floor() as u64
        };

        IncomeScenarios {
            conservative: floor_sum(|entry| entry.conservative),
            typical: floor_sum(|entry| entry.typical),
            optimistic: floor_sum(|entry| entry.optimistic),
            breakdown,
        }
    }

    /// Scenario to budget against given how reliable the sources are.
    pub fn suggested_scenario(sources: &[IncomeSource]) -> IncomeScenario {
        let risky = sources.iter().any(|source| {
            source.confidence == IncomeConfidence::Uncertain
                || source.frequency == IncomeFrequency::Irregular
        });
        if risky {
            IncomeScenario::Conservative
        } else {
            IncomeScenario::Typical
        }
    }

    /// Income figure for `scenario`, or for the suggested scenario when none is given.
    pub fn budget_income(
        sources: &[IncomeSource],
        reference: NaiveDate,
        scenario: Option<IncomeScenario>,
    ) -> u64 {
        let scenario = scenario.unwrap_or_else(|| Self::suggested_scenario(sources));
        Self::monthly_income(sources, reference).value(scenario)
    }
}
