//! Duration parsing and formatting.

use anyhow::{bail, Result};
use std::time::Duration;

/// Parse a duration string like "500ms", "30s", "5m", "1h" or "7d".
///
/// A bare number is taken as seconds.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        bail!("empty duration");
    }

    if let Some(ms) = input.strip_suffix("ms") {
        let n: u64 = ms.trim().parse()?;
        Ok(Duration::from_millis(n))
    } else if let Some(days) = input.strip_suffix('d') {
        let n: u64 = days.trim().parse()?;
        Ok(Duration::from_secs(n * 86_400))
    } else if let Some(hours) = input.strip_suffix('h') {
        let n: u64 = hours.trim().parse()?;
        Ok(Duration::from_secs(n * 3_600))
    } else if let Some(mins) = input.strip_suffix('m') {
        let n: u64 = mins.trim().parse()?;
        Ok(Duration::from_secs(n * 60))
    } else if let Some(secs) = input.strip_suffix('s') {
        let n: f64 = secs.trim().parse()?;
        seconds(n)
    } else {
        let n: f64 = input.parse()?;
        seconds(n)
    }
}

fn seconds(n: f64) -> Result<Duration> {
    if !n.is_finite() || n < 0.0 {
        bail!("duration must be a non-negative number of seconds");
    }
    Ok(Duration::from_secs_f64(n))
}

/// Format a duration compactly for display ("7d", "12h", "30m", "45s").
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs >= 86_400 {
        format!("{}d", secs / 86_400)
    } else if secs >= 3_600 {
        format!("{}h", secs / 3_600)
    } else if secs >= 60 {
        format!("{}m", secs / 60)
    } else if secs == 0 && duration.subsec_millis() > 0 {
        format!("{}ms", duration.subsec_millis())
    } else {
        format!("{}s", secs)
    }
}

/// Format uptime as `"1d 2h 3m 4s"`, omitting a zero day count.
pub fn format_uptime(secs: u64) -> String {
    let (days, hours, mins, s) = split(secs);
    if days > 0 {
        format!("{days}d {hours}h {mins}m {s}s")
    } else {
        format!("{hours}h {mins}m {s}s")
    }
}

/// Format uptime without seconds: `"1d 2h 3m"` or `"2h 3m"`.
pub fn format_uptime_short(secs: u64) -> String {
    let (days, hours, mins, _) = split(secs);
    if days > 0 {
        format!("{days}d {hours}h {mins}m")
    } else {
        format!("{hours}h {mins}m")
    }
}

/// Format remaining battery time as `"1h 23m"`.
pub fn format_time_left(secs: u64) -> String {
    let hours = secs / 3_600;
    let mins = (secs % 3_600) / 60;
    format!("{hours}h {mins}m")
}

fn split(secs: u64) -> (u64, u64, u64, u64) {
    (
        secs / 86_400,
        (secs % 86_400) / 3_600,
        (secs % 3_600) / 60,
        secs % 60,
    )
}
