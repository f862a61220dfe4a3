//! Daily summary and suggestions over a day's appointments
//!
//! Two operations with different gap thresholds: the summary reports the
//! largest free gap above 30 minutes, the suggestions only above 60 minutes.
//! Peak hour and top service ties go to the entry encountered first while
//! walking the appointments in start order.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::time::minutes_to_time;
use crate::error::AppResult;

/// Gap threshold of the daily summary, in minutes
pub const SUMMARY_GAP_THRESHOLD_MINUTES: u32 = 30;

/// Gap threshold of the suggestions, in minutes
pub const SUGGESTION_GAP_THRESHOLD_MINUTES: u32 = 60;

pub const NO_APPOINTMENTS_MESSAGE: &str = "Nenhum agendamento para hoje.";

/// An appointment with computed bounds, price and service name
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedAppointment {
    pub id: Uuid,
    /// Minutes since midnight
    pub start: u32,
    pub end: u32,
    pub price: Decimal,
    pub service_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AppointmentMark {
    pub appointment_id: Uuid,
    pub start: String,
    pub service_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Gap {
    pub start: String,
    pub end: String,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PeakHour {
    pub hour: u32,
    pub appointments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopService {
    pub name: String,
    #[schema(value_type = String)]
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayOverview {
    pub total: usize,
    pub first: AppointmentMark,
    pub last: AppointmentMark,
    #[schema(value_type = String)]
    pub revenue: Decimal,
    pub largest_gap: Option<Gap>,
    pub peak_hour: PeakHour,
    pub top_service: TopService,
}

/// Result of `summarize_day`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DaySummary {
    Empty { total: usize, message: String },
    Day(DayOverview),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    EmptyDay,
    FreeWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
    pub gap: Option<Gap>,
}

fn sorted_by_start(appointments: &[EnrichedAppointment]) -> Vec<&EnrichedAppointment> {
    let mut sorted: Vec<&EnrichedAppointment> = appointments.iter().collect();
    // sort_by_key is stable: equal starts keep input order
    sorted.sort_by_key(|a| a.start);
    sorted
}

/// Largest positive gap between consecutive appointments, as (start, end)
fn largest_gap(sorted: &[&EnrichedAppointment]) -> Option<(u32, u32)> {
    let mut best: Option<(u32, u32)> = None;
    for pair in sorted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next.start <= prev.end {
            continue;
        }
        let gap = next.start - prev.end;
        if best.map_or(true, |(s, e)| gap > e - s) {
            best = Some((prev.end, next.start));
        }
    }
    best
}

fn gap_over(sorted: &[&EnrichedAppointment], threshold: u32) -> AppResult<Option<Gap>> {
    match largest_gap(sorted) {
        Some((start, end)) if end - start > threshold => Ok(Some(Gap {
            start: minutes_to_time(start)?,
            end: minutes_to_time(end)?,
            minutes: end - start,
        })),
        _ => Ok(None),
    }
}

fn mark(appointment: &EnrichedAppointment) -> AppResult<AppointmentMark> {
    Ok(AppointmentMark {
        appointment_id: appointment.id,
        start: minutes_to_time(appointment.start)?,
        service_name: appointment.service_name.clone(),
    })
}

/// Summarize a day: bounds, revenue, largest gap, peak hour and top service
pub fn summarize_day(appointments: &[EnrichedAppointment]) -> AppResult<DaySummary> {
    let sorted = sorted_by_start(appointments);
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Ok(DaySummary::Empty {
            total: 0,
            message: NO_APPOINTMENTS_MESSAGE.to_string(),
        });
    };

    let revenue: Decimal = sorted.iter().map(|a| a.price).sum();

    let mut per_hour: IndexMap<u32, usize> = IndexMap::new();
    let mut per_service: IndexMap<&str, Decimal> = IndexMap::new();
    for appointment in &sorted {
        *per_hour.entry(appointment.start / 60).or_insert(0) += 1;
        *per_service
            .entry(appointment.service_name.as_str())
            .or_insert(Decimal::ZERO) += appointment.price;
    }

    let mut peak_hour = PeakHour { hour: 0, appointments: 0 };
    for (&hour, &count) in &per_hour {
        if count > peak_hour.appointments {
            peak_hour = PeakHour { hour, appointments: count };
        }
    }

    let mut top: Option<(&str, Decimal)> = None;
    for (&name, &total) in &per_service {
        if top.map_or(true, |(_, best)| total > best) {
            top = Some((name, total));
        }
    }
    let top_service = top
        .map(|(name, revenue)| TopService { name: name.to_string(), revenue })
        .unwrap_or(TopService { name: String::new(), revenue: Decimal::ZERO });

    Ok(DaySummary::Day(DayOverview {
        total: sorted.len(),
        first: mark(first)?,
        last: mark(last)?,
        revenue,
        largest_gap: gap_over(&sorted, SUMMARY_GAP_THRESHOLD_MINUTES)?,
        peak_hour,
        top_service,
    }))
}

/// Actionable suggestions for a day
pub fn suggest_for_day(appointments: &[EnrichedAppointment]) -> AppResult<Vec<Suggestion>> {
    if appointments.is_empty() {
        return Ok(vec![Suggestion {
            kind: SuggestionKind::EmptyDay,
            message: format!(
                "{} Que tal divulgar seus horários na vitrine?",
                NO_APPOINTMENTS_MESSAGE
            ),
            gap: None,
        }]);
    }

    let sorted = sorted_by_start(appointments);
    let mut suggestions = Vec::new();

    if let Some(gap) = gap_over(&sorted, SUGGESTION_GAP_THRESHOLD_MINUTES)? {
        suggestions.push(Suggestion {
            kind: SuggestionKind::FreeWindow,
            message: format!(
                "Você tem {} minutos livres entre {} e {}. Ofereça esse horário aos seus clientes.",
                gap.minutes, gap.start, gap.end
            ),
            gap: Some(gap),
        });
    }

    Ok(suggestions)
}
