pub(crate) mod files;
pub mod input;

use std::sync::Once;

pub use input::{clamp_amount, sanitize_amount};

static TRACING_INIT: Once = Once::new();

pub const DEFAULT_LOG_FILTER: &str = "tiered_budget=info";

/// Initializes the global tracing subscriber. `RUST_LOG` wins over the provided filter.
pub fn init_tracing(filter: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let fallback = filter.unwrap_or(DEFAULT_LOG_FILTER);
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        // Another subscriber may already be installed by the embedding application.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

/// Renders a whole-dollar amount with thousands separators, e.g. `$12,500`.
pub fn format_dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}
