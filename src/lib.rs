#![doc(test(attr(deny(warnings))))]

//! Tiered Budget provides the allocation, gap messaging, monthly history and legacy
//! migration logic behind a four-tier priority budget.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::budget_manager::BudgetManager;
pub use errors::BudgetError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(None);
        tracing::info!("Tiered budget tracing initialized.");
    });
}

/// Initializes tracing using the filter carried by a loaded [`config::Config`].
pub fn init_with_config(config: &config::Config) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(Some(&config.log_filter));
        tracing::info!(filter = %config.log_filter, "Tiered budget tracing initialized.");
    });
}
