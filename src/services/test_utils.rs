//! Shared fixtures for service tests

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::Services;
use crate::{
    clock::FixedClock,
    config::SchedulingConfig,
    models::{
        appointment::{Appointment, AppointmentStatus},
        professional::Professional,
        service::Service,
        working_hours::{DaySchedule, TimeBlock, Weekday, WorkingHours},
    },
    repository::InMemoryStore,
};

/// Monday 2025-03-10
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).unwrap()
}

/// Monday to Friday, 09:00-12:00 and 13:00-18:00, 30 minute step
pub fn weekday_hours() -> WorkingHours {
    let mut hours = WorkingHours { interval: 30, ..Default::default() };
    for day in [
        Weekday::Segunda,
        Weekday::Terca,
        Weekday::Quarta,
        Weekday::Quinta,
        Weekday::Sexta,
    ] {
        hours.days.insert(
            day,
            DaySchedule::open(vec![TimeBlock::new("09:00", "12:00"), TimeBlock::new("13:00", "18:00")]),
        );
    }
    hours
}

pub struct Fixture {
    pub tenant_id: Uuid,
    pub store: InMemoryStore,
    pub professional: Professional,
    pub service: Service,
}

impl Fixture {
    pub fn new() -> Self {
        let tenant_id = Uuid::new_v4();
        let store = InMemoryStore::new();

        let service = Service {
            id: Uuid::new_v4(),
            tenant_id,
            name: "Corte".to_string(),
            price: Decimal::new(4500, 2),
            duration_minutes: 30,
            visible_in_storefront: true,
            created_at: None,
        };
        let professional = Professional {
            id: Uuid::new_v4(),
            tenant_id,
            name: "Ana".to_string(),
            working_hours: weekday_hours(),
            special_dates: Vec::new(),
            service_ids: vec![service.id],
            created_at: None,
        };

        store.put_service(service.clone()).unwrap();
        store.put_professional(professional.clone()).unwrap();

        Self { tenant_id, store, professional, service }
    }

    pub fn services(&self, now: NaiveDateTime) -> Services {
        Services::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(FixedClock(now)),
            SchedulingConfig::default(),
        )
    }

    pub fn appointment(&self, date: NaiveDate, start: &str, duration: i32) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            tenant_id: self.tenant_id,
            professional_id: self.professional.id,
            service_id: self.service.id,
            date,
            start_time: start.to_string(),
            duration_minutes: duration,
            status: AppointmentStatus::Active,
            client_id: Uuid::new_v4(),
            price: self.service.price,
            created_at: Utc::now(),
        }
    }

    pub fn book(&self, date: NaiveDate, start: &str, duration: i32) -> Appointment {
        let appointment = self.appointment(date, start, duration);
        self.store.put_appointment(appointment.clone()).unwrap();
        appointment
    }
}
