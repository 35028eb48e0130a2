//! Sanitisation applied to raw user input before it reaches the allocation engine.

/// Converts free-form user text into a whole-dollar amount.
///
/// Anything after the first `.` is treated as cents and dropped; every remaining
/// non-digit character (currency symbols, separators, a leading minus) is stripped.
/// Empty input yields `0` and values too large for `u64` saturate.
pub fn sanitize_amount(raw: &str) -> u64 {
    let whole = raw.split('.').next().unwrap_or_default();
    let digits: String = whole.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Clamps a signed amount to the non-negative domain by taking its magnitude.
pub fn clamp_amount(value: i64) -> u64 {
    value.unsigned_abs()
}

/// Converts a JSON number into whole dollars: fractional parts are floored and
/// negative values clamped to their magnitude. Non-finite values become `0`.
pub fn whole_dollars(value: f64) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    let magnitude = value.abs().floor();
    if magnitude >= u64::MAX as f64 {
        u64::MAX
    } else {
        magnitude as u64
    }
}
