//! Scheduling engine: slot computation and daily insights
//!
//! Everything here is pure and synchronous; storage access lives in
//! `services`.

pub mod availability;
pub mod insights;
pub mod time;

pub use availability::{compute_slots, conflicts, default_start_date, is_blocked, OccupiedInterval};
pub use insights::{suggest_for_day, summarize_day, DaySummary, EnrichedAppointment, Suggestion};
pub use time::{minutes_to_time, time_to_minutes};
