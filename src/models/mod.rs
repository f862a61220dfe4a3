//! Data models for Agenda

pub mod appointment;
pub mod professional;
pub mod service;
pub mod working_hours;

// Re-export commonly used types
pub use appointment::{Appointment, AppointmentStatus};
pub use professional::Professional;
pub use service::Service;
pub use working_hours::{DaySchedule, SpecialDate, TimeBlock, Weekday, WorkingHours};
