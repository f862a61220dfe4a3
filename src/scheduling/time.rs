//! "HH:MM" <-> minute-of-day conversions

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, AppResult};

/// Minutes in a day
pub const MINUTES_PER_DAY: u32 = 24 * 60;

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("valid time regex"));

/// Parse "HH:MM" into minutes since midnight
pub fn time_to_minutes(s: &str) -> AppResult<u32> {
    let caps = TIME_RE
        .captures(s)
        .ok_or_else(|| AppError::Format(format!("'{}' is not a valid HH:MM time", s)))?;

    // Both groups are two ASCII digits
    let hours: u32 = caps[1].parse().map_err(|_| AppError::Format(s.to_string()))?;
    let minutes: u32 = caps[2].parse().map_err(|_| AppError::Format(s.to_string()))?;
    Ok(hours * 60 + minutes)
}

/// Format minutes since midnight as "HH:MM"; no wraparound past 23:59
pub fn minutes_to_time(m: u32) -> AppResult<String> {
    if m >= MINUTES_PER_DAY {
        return Err(AppError::Format(format!(
            "{} minutes does not fit in a single day",
            m
        )));
    }
    Ok(format!("{:02}:{:02}", m / 60, m % 60))
}
