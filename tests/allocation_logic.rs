mod common;

use common::tiers_with_totals;
use tiered_budget::{
    core::services::{AllocationService, GapService, GapSeverity},
    domain::{Affordability, ExpenseItem, Tier, TierId},
};

fn affordability(income: u64, tiers: &[Tier]) -> Vec<Affordability> {
    AllocationService::allocate(income, tiers)
        .iter()
        .map(Tier::affordability)
        .collect()
}

#[test]
fn comfortable_income_covers_every_tier() {
    let tiers = tiers_with_totals([1250, 480, 450, 650]);
    let report = AllocationService::report(5000, &tiers);

    let remaining: Vec<u64> = report.steps.iter().map(|step| step.remaining_after).collect();
    assert_eq!(remaining, vec![3750, 3270, 2820, 2170]);
    assert!(report
        .steps
        .iter()
        .all(|step| step.affordability == Affordability::Affordable));
    assert_eq!(report.remaining, 2170);
}

#[test]
fn full_coverage_wins_over_borderline() {
    let tiers = tiers_with_totals([1250, 480, 100, 100]);
    let report = AllocationService::report(1900, &tiers);

    let survival = report.step(TierId::Survival).unwrap();
    assert_eq!(survival.affordability, Affordability::Affordable);
    assert_eq!(survival.remaining_after, 650);

    let important = report.step(TierId::Important).unwrap();
    assert_eq!(important.affordability, Affordability::Affordable);
    assert_eq!(important.remaining_after, 170);

    let quality = report.step(TierId::QualityOfLife).unwrap();
    assert_eq!(quality.affordability, Affordability::Affordable);
    assert_eq!(quality.remaining_after, 70);

    let future = report.step(TierId::FutureBuilding).unwrap();
    assert_eq!(future.affordability, Affordability::Borderline);
    assert_eq!(future.remaining_after, 0);
}

#[test]
fn borderline_survival_starves_the_rest() {
    let tiers = tiers_with_totals([1250, 480, 450, 650]);
    assert_eq!(
        affordability(1000, &tiers),
        vec![
            Affordability::Borderline,
            Affordability::NotAffordable,
            Affordability::NotAffordable,
            Affordability::NotAffordable,
        ]
    );
    assert_eq!(AllocationService::report(1000, &tiers).remaining, 0);
}

#[test]
fn tiers_are_processed_by_id_not_input_order() {
    let mut tiers = tiers_with_totals([800, 300, 0, 0]);
    tiers.reverse();

    let allocated = AllocationService::allocate(1000, &tiers);
    let ids: Vec<TierId> = allocated.iter().map(|tier| tier.id).collect();
    assert_eq!(ids, TierId::ALL.to_vec());
    assert!(allocated[0].is_affordable());
    // 200 left for 300: at least half covered.
    assert!(allocated[1].is_borderline());
}

#[test]
fn swapping_tier_costs_changes_the_outcome() {
    let survival_heavy = affordability(1000, &tiers_with_totals([1000, 50, 0, 0]));
    let important_heavy = affordability(1000, &tiers_with_totals([50, 1000, 0, 0]));

    assert_eq!(survival_heavy[1], Affordability::NotAffordable);
    assert_eq!(important_heavy[1], Affordability::Borderline);
}

#[test]
fn a_survival_upgrade_can_starve_later_tiers() {
    let tiers = tiers_with_totals([100, 10, 0, 0]);
    // 40 covers less than half of survival, so it carries over to tier two.
    assert_eq!(
        affordability(40, &tiers)[..2],
        [Affordability::NotAffordable, Affordability::Affordable]
    );
    // 50 makes survival borderline, which consumes everything.
    assert_eq!(
        affordability(50, &tiers)[..2],
        [Affordability::Borderline, Affordability::NotAffordable]
    );
}

#[test]
fn disabled_expenses_do_not_count() {
    let tiers = vec![
        Tier::new(TierId::Survival)
            .with_expense(ExpenseItem::new("Rent", 900))
            .with_expense(ExpenseItem::new("Storage unit", 5000).disabled()),
        Tier::new(TierId::Important),
        Tier::new(TierId::QualityOfLife),
        Tier::new(TierId::FutureBuilding),
    ];
    let report = AllocationService::report(1000, &tiers);
    let survival = report.step(TierId::Survival).unwrap();
    assert_eq!(survival.total, 900);
    assert_eq!(survival.affordability, Affordability::Affordable);
    assert_eq!(report.remaining, 100);
}

#[test]
fn empty_tiers_stay_affordable_after_income_runs_out() {
    let tiers = tiers_with_totals([5000, 0, 250, 0]);
    assert_eq!(
        affordability(100, &tiers),
        vec![
            Affordability::NotAffordable,
            Affordability::Affordable,
            Affordability::NotAffordable,
            Affordability::Affordable,
        ]
    );
}

#[test]
fn zero_income_marks_every_cost_unaffordable() {
    let tiers = tiers_with_totals([1, 1, 1, 1]);
    assert!(affordability(0, &tiers)
        .iter()
        .all(|state| *state == Affordability::NotAffordable));
}

#[test]
fn totals_split_essentials_from_flexible_spending() {
    let tiers = tiers_with_totals([1250, 480, 450, 650]);
    let totals = AllocationService::totals(1900, &tiers);

    assert_eq!(totals.income, 1900);
    assert_eq!(totals.essential_expenses, 1730);
    assert_eq!(totals.total_spending, 2830);
    assert_eq!(totals.flexible_money, 170);
    assert_eq!(totals.money_left, -930);
    assert!(totals.survival_covered);
    assert_eq!(totals.tier_total(TierId::QualityOfLife), 450);
}

#[test]
fn essentials_gap_feeds_gap_messaging() {
    let tiers = tiers_with_totals([2600, 475, 0, 0]);
    let totals = AllocationService::totals(3000, &tiers);
    assert_eq!(totals.flexible_money, -75);

    let message = GapService::classify(totals.flexible_money, totals.income as i64);
    assert_eq!(message.severity, GapSeverity::Moderate);
    assert!(!message.show_help);
    assert_eq!(message.action_suggestions.map(|list| list.len()), Some(3));
    assert!(message.description.contains("$75"));
}

#[test]
fn gap_severity_ladder() {
    assert_eq!(GapService::severity(10, 3000), GapSeverity::None);
    assert_eq!(GapService::severity(0, 3000), GapSeverity::None);
    assert_eq!(GapService::severity(-50, 3000), GapSeverity::Minor);
    assert_eq!(GapService::severity(-200, 3000), GapSeverity::Moderate);
    assert_eq!(GapService::severity(-1000, 3000), GapSeverity::Significant);
    assert_eq!(GapService::severity(-1500, 3000), GapSeverity::Severe);
    assert_eq!(GapService::severity(-20, 0), GapSeverity::Severe);
}

#[test]
fn severe_gaps_offer_help() {
    let message = GapService::classify(-2500, 3000);
    assert_eq!(message.severity, GapSeverity::Severe);
    assert!(message.show_help);
    assert_eq!(message.action_suggestions.map(|list| list.len()), Some(4));

    let covered = GapService::classify(400, 3000);
    assert!(!covered.show_help);
    assert!(covered.action_suggestions.is_none());
}
