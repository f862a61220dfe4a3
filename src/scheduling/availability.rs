//! Availability calculator
//!
//! Candidate slots are generated block by block, in the order the blocks are
//! stored, stepping by the template interval (or by the service duration when
//! the interval is zero).

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::time::{minutes_to_time, time_to_minutes};
use crate::{
    error::AppResult,
    models::working_hours::{SpecialDate, Weekday, WorkingHours},
};

/// A booked `[start, end)` interval in minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OccupiedInterval {
    pub start: u32,
    pub end: u32,
}

impl OccupiedInterval {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// Whether `[start, start + duration)` overlaps any occupied interval.
/// Touching endpoints do not conflict.
pub fn conflicts(start: u32, duration: u32, occupied: &[OccupiedInterval]) -> bool {
    let end = start.saturating_add(duration);
    occupied.iter().any(|occ| start < occ.end && end > occ.start)
}

/// Whether a special-date override closes the whole day
pub fn is_blocked(date: NaiveDate, special_dates: &[SpecialDate]) -> bool {
    special_dates.iter().any(|special| special.covers(date))
}

/// First date a "next available" search should consider: today, or tomorrow
/// once the local clock has reached `cutoff_hour`.
pub fn default_start_date(now: NaiveDateTime, cutoff_hour: u32) -> NaiveDate {
    let today = now.date();
    if now.hour() >= cutoff_hour {
        today + Duration::days(1)
    } else {
        today
    }
}

/// Free start times ("HH:MM") for a service of `duration_minutes` on `date`
pub fn compute_slots(
    date: NaiveDate,
    template: &WorkingHours,
    occupied: &[OccupiedInterval],
    duration_minutes: u32,
    now: NaiveDateTime,
) -> AppResult<Vec<String>> {
    let mut slots = Vec::new();

    let day = match template.day(Weekday::of(date)) {
        Some(day) if day.active && !day.blocks.is_empty() => day,
        _ => return Ok(slots),
    };

    if duration_minutes == 0 {
        return Ok(slots);
    }

    let step = if template.interval > 0 {
        template.interval
    } else {
        duration_minutes
    };

    let is_today = date == now.date();
    let now_minutes = now.hour() * 60 + now.minute();

    for block in &day.blocks {
        let start = time_to_minutes(&block.start)?;
        let end = time_to_minutes(&block.end)?;

        let mut cursor = start;
        while cursor
            .checked_add(duration_minutes)
            .is_some_and(|slot_end| slot_end <= end)
        {
            let taken = conflicts(cursor, duration_minutes, occupied);
            let past = is_today && cursor <= now_minutes;
            if !taken && !past {
                slots.push(minutes_to_time(cursor)?);
            }
            match cursor.checked_add(step) {
                Some(next) => cursor = next,
                None => break,
            }
        }
    }

    tracing::debug!(
        "Computed {} slots for {} ({}, {} min)",
        slots.len(),
        date,
        Weekday::of(date),
        duration_minutes
    );

    Ok(slots)
}
