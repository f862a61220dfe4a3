//! Working-hour templates and special-date overrides
//!
//! `WorkingHours::from_document` is the only way stored documents enter the
//! canonical schema: older documents use Portuguese keys (`ativo`, `blocos`,
//! `inicio`, `fim`, `intervalo`), flat weekday keys or a single block per day.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    scheduling::time::{time_to_minutes, MINUTES_PER_DAY},
};

// ---------------------------------------------------------------------------
// Weekday
// ---------------------------------------------------------------------------

/// Weekday keys of a template
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Domingo,
    Segunda,
    Terca,
    Quarta,
    Quinta,
    Sexta,
    Sabado,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Domingo,
        Weekday::Segunda,
        Weekday::Terca,
        Weekday::Quarta,
        Weekday::Quinta,
        Weekday::Sexta,
        Weekday::Sabado,
    ];

    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Domingo => "domingo",
            Weekday::Segunda => "segunda",
            Weekday::Terca => "terca",
            Weekday::Quarta => "quarta",
            Weekday::Quinta => "quinta",
            Weekday::Sexta => "sexta",
            Weekday::Sabado => "sabado",
        }
    }

    /// Parse a stored key, tolerating accents, casing and the "-feira" suffix
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        let key = key.strip_suffix("-feira").unwrap_or(&key);
        match key {
            "domingo" => Some(Weekday::Domingo),
            "segunda" => Some(Weekday::Segunda),
            "terca" | "terça" => Some(Weekday::Terca),
            "quarta" => Some(Weekday::Quarta),
            "quinta" => Some(Weekday::Quinta),
            "sexta" => Some(Weekday::Sexta),
            "sabado" | "sábado" => Some(Weekday::Sabado),
            _ => None,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Segunda,
            chrono::Weekday::Tue => Weekday::Terca,
            chrono::Weekday::Wed => Weekday::Quarta,
            chrono::Weekday::Thu => Weekday::Quinta,
            chrono::Weekday::Fri => Weekday::Sexta,
            chrono::Weekday::Sat => Weekday::Sabado,
            chrono::Weekday::Sun => Weekday::Domingo,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// A contiguous open interval within a day ("HH:MM" bounds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeBlock {
    pub start: String,
    pub end: String,
}

impl TimeBlock {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Working hours of one weekday
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DaySchedule {
    pub active: bool,
    /// Kept in declaration order
    #[serde(default)]
    pub blocks: Vec<TimeBlock>,
}

impl DaySchedule {
    pub fn open(blocks: Vec<TimeBlock>) -> Self {
        Self {
            active: true,
            blocks,
        }
    }
}

/// Weekly working-hour template of a professional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkingHours {
    #[serde(default)]
    pub days: BTreeMap<Weekday, DaySchedule>,
    /// Slot step in minutes; 0 means "use the service duration"
    #[serde(default)]
    pub interval: u32,
}

/// A structural problem found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateIssue {
    MalformedTime { day: Weekday, value: String },
    EmptyBlock { day: Weekday, block: usize },
    OverlappingBlocks { day: Weekday, first: usize, second: usize },
    IntervalTooLong { interval: u32 },
}

impl std::fmt::Display for TemplateIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateIssue::MalformedTime { day, value } => {
                write!(f, "{}: invalid time '{}'", day, value)
            }
            TemplateIssue::EmptyBlock { day, block } => {
                write!(f, "{}: block {} must start before it ends", day, block + 1)
            }
            TemplateIssue::OverlappingBlocks { day, first, second } => {
                write!(f, "{}: blocks {} and {} overlap", day, first + 1, second + 1)
            }
            TemplateIssue::IntervalTooLong { interval } => {
                write!(f, "interval of {} minutes exceeds a day", interval)
            }
        }
    }
}

impl WorkingHours {
    pub fn day(&self, weekday: Weekday) -> Option<&DaySchedule> {
        self.days.get(&weekday)
    }

    /// Check the step and every day for malformed times, inverted blocks and
    /// overlaps
    pub fn issues(&self) -> Vec<TemplateIssue> {
        let mut issues = Vec::new();

        if self.interval > MINUTES_PER_DAY {
            issues.push(TemplateIssue::IntervalTooLong { interval: self.interval });
        }

        for (&day, schedule) in &self.days {
            let mut parsed = Vec::with_capacity(schedule.blocks.len());
            for (idx, block) in schedule.blocks.iter().enumerate() {
                let start = time_to_minutes(&block.start);
                let end = time_to_minutes(&block.end);
                if start.is_err() {
                    issues.push(TemplateIssue::MalformedTime { day, value: block.start.clone() });
                }
                if end.is_err() {
                    issues.push(TemplateIssue::MalformedTime { day, value: block.end.clone() });
                }
                if let (Ok(start), Ok(end)) = (start, end) {
                    if start >= end {
                        issues.push(TemplateIssue::EmptyBlock { day, block: idx });
                    } else {
                        parsed.push((idx, start, end));
                    }
                }
            }

            for (i, &(first, start_a, end_a)) in parsed.iter().enumerate() {
                for &(second, start_b, end_b) in &parsed[i + 1..] {
                    if start_a < end_b && start_b < end_a {
                        issues.push(TemplateIssue::OverlappingBlocks { day, first, second });
                    }
                }
            }
        }

        issues
    }

    /// Strict check used by the editing surface
    pub fn ensure_valid(&self) -> AppResult<()> {
        let issues = self.issues();
        if issues.is_empty() {
            return Ok(());
        }
        let detail = issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(AppError::Validation(format!("Invalid working hours: {}", detail)))
    }

    /// Normalize a stored document into the canonical template
    pub fn from_document(doc: &Value) -> AppResult<Self> {
        let obj = doc
            .as_object()
            .ok_or_else(|| AppError::Validation("Working hours must be an object".to_string()))?;

        let interval = obj
            .get("interval")
            .or_else(|| obj.get("intervalo"))
            .map(parse_interval)
            .unwrap_or(0);

        // Canonical documents nest days under "days"; legacy ones keep them flat
        let day_entries: &Map<String, Value> = match obj.get("days").and_then(Value::as_object) {
            Some(days) => days,
            None => obj,
        };

        let mut days = BTreeMap::new();
        for (key, value) in day_entries {
            if matches!(key.as_str(), "interval" | "intervalo" | "days") {
                continue;
            }
            match Weekday::from_key(key) {
                Some(weekday) => {
                    days.insert(weekday, parse_day(value));
                }
                None => tracing::warn!("Ignoring unknown weekday key '{}' in working hours", key),
            }
        }

        let hours = Self { days, interval };
        for issue in hours.issues() {
            tracing::warn!("Working hours loaded with issue: {}", issue);
        }
        Ok(hours)
    }
}

/// Step in minutes; anything unreadable or longer than a day becomes 0
fn parse_interval(value: &Value) -> u32 {
    let interval = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };

    if interval > MINUTES_PER_DAY {
        tracing::warn!("Ignoring working hours interval of {} minutes", interval);
        return 0;
    }
    interval
}

fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k))
}

fn as_time(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(|s| s.trim().to_string())
}

fn parse_block(value: &Value) -> Option<TimeBlock> {
    let obj = value.as_object()?;
    let start = as_time(field(obj, &["start", "inicio"]))?;
    let end = as_time(field(obj, &["end", "fim"]))?;
    Some(TimeBlock { start, end })
}

fn parse_day(value: &Value) -> DaySchedule {
    let Some(obj) = value.as_object() else {
        return DaySchedule::default();
    };

    let active = field(obj, &["active", "ativo"])
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let blocks = match field(obj, &["blocks", "blocos"]).and_then(Value::as_array) {
        Some(list) => list.iter().filter_map(parse_block).collect(),
        // Single-block legacy day
        None => parse_block(value).into_iter().collect(),
    };

    DaySchedule { active, blocks }
}

// ---------------------------------------------------------------------------
// SpecialDate
// ---------------------------------------------------------------------------

/// A date override that closes the professional's agenda
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SpecialDate {
    /// Whole month, "YYYY-MM"
    Month { month: String },
    /// Inclusive date range
    Range { start: NaiveDate, end: NaiveDate },
}

impl SpecialDate {
    pub fn covers(&self, date: NaiveDate) -> bool {
        match self {
            SpecialDate::Month { month } => {
                parse_month(month) == Some((date.year(), date.month()))
            }
            SpecialDate::Range { start, end } => *start <= date && date <= *end,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        match self {
            SpecialDate::Month { month } => {
                if parse_month(month).is_none() {
                    return Err(AppError::Validation(format!(
                        "Invalid month '{}' (use YYYY-MM)",
                        month
                    )));
                }
            }
            SpecialDate::Range { start, end } => {
                if start > end {
                    return Err(AppError::Validation(format!(
                        "Special date range {} - {} ends before it starts",
                        start, end
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_month(month: &str) -> Option<(i32, u32)> {
    let (year, month) = month.trim().split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_weekday_from_date() {
        // 2025-03-10 is a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(Weekday::of(monday), Weekday::Segunda);
        assert_eq!(Weekday::of(monday.pred_opt().unwrap()), Weekday::Domingo);
    }

    #[test]
    fn test_weekday_keys() {
        assert_eq!(Weekday::from_key("Terça"), Some(Weekday::Terca));
        assert_eq!(Weekday::from_key("sábado"), Some(Weekday::Sabado));
        assert_eq!(Weekday::from_key("quarta-feira"), Some(Weekday::Quarta));
        assert_eq!(Weekday::from_key("monday"), None);
    }

    #[test]
    fn test_canonical_document() {
        let doc = json!({
            "days": {
                "segunda": {
                    "active": true,
                    "blocks": [{"start": "09:00", "end": "12:00"}, {"start": "13:00", "end": "18:00"}]
                }
            },
            "interval": 30
        });
        let hours = WorkingHours::from_document(&doc).unwrap();
        assert_eq!(hours.interval, 30);
        let monday = hours.day(Weekday::Segunda).unwrap();
        assert!(monday.active);
        assert_eq!(monday.blocks.len(), 2);
        assert_eq!(monday.blocks[1], TimeBlock::new("13:00", "18:00"));
    }

    #[test]
    fn test_legacy_document() {
        let doc = json!({
            "segunda": {"ativo": true, "blocos": [{"inicio": "08:00", "fim": "11:00"}]},
            "terça": {"ativo": true, "inicio": "14:00", "fim": "19:00"},
            "domingo": {"ativo": false},
            "feriado": {"ativo": true},
            "intervalo": "15"
        });
        let hours = WorkingHours::from_document(&doc).unwrap();
        assert_eq!(hours.interval, 15);
        assert_eq!(hours.days.len(), 3);
        assert_eq!(
            hours.day(Weekday::Terca).unwrap(),
            &DaySchedule::open(vec![TimeBlock::new("14:00", "19:00")])
        );
        assert!(!hours.day(Weekday::Domingo).unwrap().active);
    }

    #[test]
    fn test_missing_interval_defaults_to_zero() {
        let hours = WorkingHours::from_document(&json!({"sexta": {"active": true}})).unwrap();
        assert_eq!(hours.interval, 0);
        assert!(hours.day(Weekday::Sexta).unwrap().blocks.is_empty());
    }

    #[test]
    fn test_non_object_document() {
        assert!(matches!(
            WorkingHours::from_document(&json!([1, 2])),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_issues() {
        let mut hours = WorkingHours::default();
        hours.days.insert(
            Weekday::Segunda,
            DaySchedule::open(vec![
                TimeBlock::new("09:00", "12:00"),
                TimeBlock::new("11:00", "13:00"),
                TimeBlock::new("15:00", "14:00"),
                TimeBlock::new("25:00", "26:00"),
            ]),
        );
        let issues = hours.issues();
        assert!(issues.contains(&TemplateIssue::OverlappingBlocks {
            day: Weekday::Segunda,
            first: 0,
            second: 1
        }));
        assert!(issues.contains(&TemplateIssue::EmptyBlock { day: Weekday::Segunda, block: 2 }));
        assert_eq!(
            issues
                .iter()
                .filter(|i| matches!(i, TemplateIssue::MalformedTime { .. }))
                .count(),
            2
        );
        assert!(hours.ensure_valid().is_err());
    }

    #[test]
    fn test_interval_longer_than_a_day_is_rejected() {
        let mut hours = WorkingHours { interval: u32::MAX, ..Default::default() };
        hours.days.insert(Weekday::Segunda, DaySchedule::open(vec![TimeBlock::new("09:00", "12:00")]));
        assert_eq!(hours.issues(), vec![TemplateIssue::IntervalTooLong { interval: u32::MAX }]);
        assert!(matches!(hours.ensure_valid(), Err(AppError::Validation(_))));

        hours.interval = MINUTES_PER_DAY;
        assert!(hours.ensure_valid().is_ok());
    }

    #[test]
    fn test_stored_interval_out_of_range_loads_as_zero() {
        let doc = json!({
            "segunda": { "ativo": true, "blocos": [{ "inicio": "09:00", "fim": "12:00" }] },
            "intervalo": 4294967295u64
        });
        assert_eq!(WorkingHours::from_document(&doc).unwrap().interval, 0);

        let doc = json!({ "days": {}, "interval": "99999999999" });
        assert_eq!(WorkingHours::from_document(&doc).unwrap().interval, 0);

        let doc = json!({ "days": {}, "interval": 1441 });
        assert_eq!(WorkingHours::from_document(&doc).unwrap().interval, 0);
    }

    #[test]
    fn test_touching_blocks_are_valid() {
        let mut hours = WorkingHours::default();
        hours.days.insert(
            Weekday::Quarta,
            DaySchedule::open(vec![TimeBlock::new("09:00", "12:00"), TimeBlock::new("12:00", "15:00")]),
        );
        assert!(hours.ensure_valid().is_ok());
    }

    #[test]
    fn test_special_dates() {
        let month = SpecialDate::Month { month: "2025-07".to_string() };
        assert!(month.covers(NaiveDate::from_ymd_opt(2025, 7, 31).unwrap()));
        assert!(!month.covers(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()));

        let range = SpecialDate::Range {
            start: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 12, 26).unwrap(),
        };
        assert!(range.covers(NaiveDate::from_ymd_opt(2025, 12, 24).unwrap()));
        assert!(range.covers(NaiveDate::from_ymd_opt(2025, 12, 26).unwrap()));
        assert!(!range.covers(NaiveDate::from_ymd_opt(2025, 12, 27).unwrap()));
    }

    #[test]
    fn test_special_date_serde() {
        let parsed: SpecialDate =
            serde_json::from_value(json!({"kind": "range", "start": "2025-01-02", "end": "2025-01-05"}))
                .unwrap();
        assert!(matches!(parsed, SpecialDate::Range { .. }));
        let parsed: SpecialDate =
            serde_json::from_value(json!({"kind": "month", "month": "2025-13"})).unwrap();
        assert!(parsed.validate().is_err());
    }
}
