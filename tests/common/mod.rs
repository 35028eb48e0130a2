#![allow(dead_code)]

use std::sync::Arc;

use tiered_budget::{
    config::Config,
    core::FixedClock,
    domain::{ExpenseItem, Tier, TierId},
    storage::MemoryStore,
    BudgetManager,
};

pub fn clock_on(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock::on(year, month, day).expect("valid calendar date")
}

/// Opens a manager over a shared store so a test can reopen the same state later.
pub fn open_on(store: &Arc<MemoryStore>, clock: FixedClock) -> BudgetManager {
    open_with_config(store, clock, Config::default())
}

pub fn open_with_config(
    store: &Arc<MemoryStore>,
    clock: FixedClock,
    config: Config,
) -> BudgetManager {
    BudgetManager::open(Box::new(Arc::clone(store)), Box::new(clock), config)
        .expect("open budget manager")
}

/// The four tiers, each holding one enabled expense of the given amount
/// (or nothing when the amount is zero).
pub fn tiers_with_totals(totals: [u64; 4]) -> Vec<Tier> {
    TierId::ALL
        .into_iter()
        .zip(totals)
        .map(|(id, amount)| {
            let tier = Tier::new(id);
            if amount == 0 {
                tier
            } else {
                tier.with_expense(ExpenseItem::new(format!("{} costs", id.default_name()), amount))
            }
        })
        .collect()
}
