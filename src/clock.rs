//! Injectable wall clock in the business' local time

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};

/// Source of the current local date and time
pub trait Clock: Send + Sync {
    /// Local wall-clock time of the business
    fn now(&self) -> NaiveDateTime;

    /// Same instant as an absolute timestamp, for record keeping
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Real clock: UTC shifted by the configured business offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: Duration,
}

impl SystemClock {
    pub fn new(utc_offset_minutes: i32) -> Self {
        Self {
            offset: Duration::minutes(utc_offset_minutes as i64),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc() + self.offset
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant; the local reading doubles as UTC
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        assert_eq!(FixedClock(at).now(), at);
        assert_eq!(FixedClock(at).now_utc().naive_utc(), at);
    }

    #[test]
    fn test_system_clock_offset() {
        let utc = SystemClock::new(0).now();
        let shifted = SystemClock::new(-180).now();
        let diff = utc - shifted;
        assert!(diff >= Duration::minutes(179) && diff <= Duration::minutes(181));
    }
}
