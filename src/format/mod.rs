//! Formatting helpers for directive output.
//!
//! Pure functions that turn raw metric values into the directive language's
//! textual conventions: byte sizes with binary suffixes, whole percentages
//! and human-readable durations.

pub mod bytes;
pub mod duration;

pub use bytes::{format_bytes, format_kib};
pub use duration::{
    format_duration, format_time_left, format_uptime, format_uptime_short, parse_duration,
};

/// Round a percentage to the nearest whole number.
///
/// Halves round away from zero, so `45.5` renders as `46`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    format!("{}", value.round() as i64)
}

/// Percentage of `part` in `total`, rounded to a whole number.
///
/// A zero total yields `"0"`.
pub fn ratio_percent(part: u64, total: u64) -> String {
    if total == 0 {
        return "0".to_string();
    }
    format_percent(part as f64 * 100.0 / total as f64)
}

/// Format a value with one decimal place.
pub fn format_tenths(value: f64) -> String {
    format!("{:.1}", value)
}
