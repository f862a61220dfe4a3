//! Availability service: occupancy loading, slot listing and the
//! nearest-available-date search

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    clock::Clock,
    config::SchedulingConfig,
    error::{AppError, AppResult},
    models::{professional::Professional, service::Service},
    repository::{AppointmentStore, CatalogStore},
    scheduling::{
        availability::{compute_slots, default_start_date},
        time::time_to_minutes,
        OccupiedInterval,
    },
};

/// Free slots of one professional for one service on one date
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SlotListing {
    pub date: NaiveDate,
    pub professional_id: Uuid,
    pub service_id: Uuid,
    pub duration_minutes: u32,
    /// Start times (HH:MM)
    pub slots: Vec<String>,
}

/// Result of the nearest-available-date search
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FirstAvailable {
    /// First date with at least one slot, null when none within the horizon
    pub date: Option<NaiveDate>,
    pub searched_from: NaiveDate,
    pub horizon_days: u32,
}

/// Bookable duration of a service
pub(crate) fn service_duration(service: &Service) -> AppResult<u32> {
    u32::try_from(service.duration_minutes)
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| {
            AppError::Validation(format!("Service {} has no valid duration", service.id))
        })
}

#[derive(Clone)]
pub struct AvailabilityService {
    appointments: Arc<dyn AppointmentStore>,
    catalog: Arc<dyn CatalogStore>,
    clock: Arc<dyn Clock>,
    config: SchedulingConfig,
}

impl AvailabilityService {
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        catalog: Arc<dyn CatalogStore>,
        clock: Arc<dyn Clock>,
        config: SchedulingConfig,
    ) -> Self {
        Self {
            appointments,
            catalog,
            clock,
            config,
        }
    }

    /// Occupied intervals of a professional's active appointments on `date`.
    /// Storage failures propagate; they never read as "no conflicts".
    pub async fn load_occupied(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
        professional_id: Uuid,
    ) -> AppResult<Vec<OccupiedInterval>> {
        let appointments = self
            .appointments
            .list_active(tenant_id, date, professional_id)
            .await?;

        appointments
            .iter()
            .map(|a| {
                let start = time_to_minutes(&a.start_time)?;
                Ok(OccupiedInterval::new(start, start + a.duration_minutes.max(0) as u32))
            })
            .collect()
    }

    /// Free slots on `date`, honoring special-date overrides
    pub async fn slots_for(
        &self,
        tenant_id: Uuid,
        professional: &Professional,
        date: NaiveDate,
        duration_minutes: u32,
    ) -> AppResult<Vec<String>> {
        if professional.is_blocked(date) {
            tracing::debug!("{} is blocked for professional {}", date, professional.id);
            return Ok(Vec::new());
        }

        let occupied = self.load_occupied(tenant_id, date, professional.id).await?;
        compute_slots(
            date,
            &professional.working_hours,
            &occupied,
            duration_minutes,
            self.clock.now(),
        )
    }

    /// Whether `start` is a slot the template offers on `date`, bookings
    /// aside: inside a block, on the step grid, not past and not blocked
    pub fn is_offered(
        &self,
        professional: &Professional,
        date: NaiveDate,
        start: &str,
        duration_minutes: u32,
    ) -> AppResult<bool> {
        if professional.is_blocked(date) {
            return Ok(false);
        }
        let slots = compute_slots(
            date,
            &professional.working_hours,
            &[],
            duration_minutes,
            self.clock.now(),
        )?;
        Ok(slots.iter().any(|slot| slot == start))
    }

    /// Free slots for a professional and service on `date`
    pub async fn list_slots(
        &self,
        tenant_id: Uuid,
        professional_id: Uuid,
        service_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<SlotListing> {
        let (professional, service) = self.resolve(tenant_id, professional_id, service_id).await?;
        let duration = service_duration(&service)?;
        let slots = self.slots_for(tenant_id, &professional, date, duration).await?;

        Ok(SlotListing {
            date,
            professional_id,
            service_id,
            duration_minutes: duration,
            slots,
        })
    }

    /// Scan `start_from` onwards, one date at a time, for the first date with
    /// at least one free slot. `None` when the horizon is exhausted.
    pub async fn find_first_available_date(
        &self,
        tenant_id: Uuid,
        professional: &Professional,
        duration_minutes: u32,
        start_from: NaiveDate,
        horizon_days: u32,
    ) -> AppResult<Option<NaiveDate>> {
        for offset in 0..horizon_days {
            let date = start_from + Duration::days(offset as i64);
            let slots = self
                .slots_for(tenant_id, professional, date, duration_minutes)
                .await?;
            if !slots.is_empty() {
                tracing::debug!(
                    "First available date for professional {}: {} ({} slots)",
                    professional.id,
                    date,
                    slots.len()
                );
                return Ok(Some(date));
            }
        }

        tracing::info!(
            "No availability for professional {} within {} days from {}",
            professional.id,
            horizon_days,
            start_from
        );
        Ok(None)
    }

    /// Nearest-available-date search with configured defaults
    pub async fn first_available(
        &self,
        tenant_id: Uuid,
        professional_id: Uuid,
        service_id: Uuid,
        start_from: Option<NaiveDate>,
        horizon_days: Option<u32>,
    ) -> AppResult<FirstAvailable> {
        let (professional, service) = self.resolve(tenant_id, professional_id, service_id).await?;
        let duration = service_duration(&service)?;

        let searched_from = start_from.unwrap_or_else(|| self.default_start_date());
        let horizon_days = horizon_days.unwrap_or(self.config.horizon_days);

        let date = self
            .find_first_available_date(tenant_id, &professional, duration, searched_from, horizon_days)
            .await?;

        Ok(FirstAvailable {
            date,
            searched_from,
            horizon_days,
        })
    }

    /// Today, or tomorrow past the configured cutoff hour
    pub fn default_start_date(&self) -> NaiveDate {
        default_start_date(self.clock.now(), self.config.cutoff_hour)
    }

    async fn resolve(
        &self,
        tenant_id: Uuid,
        professional_id: Uuid,
        service_id: Uuid,
    ) -> AppResult<(Professional, Service)> {
        let professional = self.catalog.get_professional(tenant_id, professional_id).await?;
        let service = self.catalog.get_service(tenant_id, service_id).await?;
        if !professional.offers(service_id) {
            return Err(AppError::Validation(format!(
                "Professional {} does not offer service {}",
                professional_id, service_id
            )));
        }
        Ok((professional, service))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FixedClock,
        models::{appointment::AppointmentStatus, working_hours::SpecialDate},
        repository::MockAppointmentStore,
        services::test_utils::{at, monday, Fixture},
    };

    #[tokio::test]
    async fn test_load_occupied_only_active_for_professional() {
        let fx = Fixture::new();
        fx.book(monday(), "09:30", 30);
        fx.book(monday(), "14:00", 90);
        let mut cancelled = fx.appointment(monday(), "10:00", 30);
        cancelled.status = AppointmentStatus::Cancelled;
        fx.store.put_appointment(cancelled).unwrap();
        let mut other = fx.appointment(monday(), "11:00", 30);
        other.professional_id = Uuid::new_v4();
        fx.store.put_appointment(other).unwrap();

        let services = fx.services(at(monday(), 7, 0));
        let mut occupied = services
            .availability
            .load_occupied(fx.tenant_id, monday(), fx.professional.id)
            .await
            .unwrap();
        occupied.sort_by_key(|o| o.start);

        assert_eq!(
            occupied,
            vec![OccupiedInterval::new(570, 600), OccupiedInterval::new(840, 930)]
        );
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut appointments = MockAppointmentStore::new();
        appointments
            .expect_list_active()
            .returning(|_, _, _| Err(AppError::Storage("connection refused".to_string())));

        let fx = Fixture::new();
        let service = AvailabilityService::new(
            Arc::new(appointments),
            Arc::new(fx.store.clone()),
            Arc::new(FixedClock(at(monday(), 7, 0))),
            SchedulingConfig::default(),
        );

        let result = service
            .list_slots(fx.tenant_id, fx.professional.id, fx.service.id, monday())
            .await;
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_list_slots_excludes_bookings() {
        let fx = Fixture::new();
        fx.book(monday(), "09:30", 30);

        let listing = fx
            .services(at(monday(), 7, 0))
            .availability
            .list_slots(fx.tenant_id, fx.professional.id, fx.service.id, monday())
            .await
            .unwrap();

        assert_eq!(listing.duration_minutes, 30);
        assert_eq!(listing.slots.len(), 15);
        assert_eq!(&listing.slots[..2], ["09:00", "10:00"]);
    }

    #[tokio::test]
    async fn test_list_slots_requires_offered_service() {
        let fx = Fixture::new();
        let mut other = fx.service.clone();
        other.id = Uuid::new_v4();
        fx.store.put_service(other.clone()).unwrap();

        let result = fx
            .services(at(monday(), 7, 0))
            .availability
            .list_slots(fx.tenant_id, fx.professional.id, other.id, monday())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_special_dates_block_the_day() {
        let mut fx = Fixture::new();
        fx.professional.special_dates = vec![SpecialDate::Range { start: monday(), end: monday() }];
        fx.store.put_professional(fx.professional.clone()).unwrap();

        let listing = fx
            .services(at(monday(), 7, 0))
            .availability
            .list_slots(fx.tenant_id, fx.professional.id, fx.service.id, monday())
            .await
            .unwrap();
        assert!(listing.slots.is_empty());
    }

    #[tokio::test]
    async fn test_first_available_skips_full_and_closed_days() {
        let fx = Fixture::new();
        let saturday = monday() - Duration::days(2);

        // Fill Monday completely
        fx.book(monday(), "09:00", 180);
        fx.book(monday(), "13:00", 300);

        let services = fx.services(at(saturday, 10, 0));
        let found = services
            .availability
            .find_first_available_date(fx.tenant_id, &fx.professional, 30, saturday, 30)
            .await
            .unwrap();

        // Saturday and Sunday are closed, Monday is full
        assert_eq!(found, Some(monday() + Duration::days(1)));
    }

    #[tokio::test]
    async fn test_first_available_today_ignores_past_slots() {
        let fx = Fixture::new();
        let services = fx.services(at(monday(), 17, 45));

        let found = services
            .availability
            .find_first_available_date(fx.tenant_id, &fx.professional, 30, monday(), 30)
            .await
            .unwrap();
        assert_eq!(found, Some(monday() + Duration::days(1)));
    }

    #[tokio::test]
    async fn test_first_available_horizon_exhausted() {
        let mut fx = Fixture::new();
        fx.professional.special_dates = vec![SpecialDate::Month { month: "2025-03".to_string() }];

        let services = fx.services(at(monday(), 7, 0));
        let found = services
            .availability
            .find_first_available_date(fx.tenant_id, &fx.professional, 30, monday(), 7)
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_first_available_never_before_start() {
        let fx = Fixture::new();
        let wednesday = monday() + Duration::days(2);
        let services = fx.services(at(monday(), 7, 0));

        let found = services
            .availability
            .find_first_available_date(fx.tenant_id, &fx.professional, 30, wednesday, 30)
            .await
            .unwrap();
        assert_eq!(found, Some(wednesday));
    }

    #[tokio::test]
    async fn test_first_available_defaults_roll_past_cutoff() {
        let fx = Fixture::new();

        let morning = fx
            .services(at(monday(), 8, 0))
            .availability
            .first_available(fx.tenant_id, fx.professional.id, fx.service.id, None, None)
            .await
            .unwrap();
        assert_eq!(morning.searched_from, monday());
        assert_eq!(morning.date, Some(monday()));
        assert_eq!(morning.horizon_days, 30);

        let evening = fx
            .services(at(monday(), 17, 0))
            .availability
            .first_available(fx.tenant_id, fx.professional.id, fx.service.id, None, Some(5))
            .await
            .unwrap();
        assert_eq!(evening.searched_from, monday() + Duration::days(1));
        assert_eq!(evening.horizon_days, 5);
    }
}
