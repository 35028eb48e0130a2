//! Budget services and the session state container.

pub mod budget_manager;
pub mod services;
pub mod time;

pub use budget_manager::BudgetManager;
pub use time::{month_key, Clock, FixedClock, SystemClock};
