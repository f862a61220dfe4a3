//! Booking writer and appointment status transitions

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use super::availability::{service_duration, AvailabilityService};
use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    models::appointment::{Appointment, AppointmentStatus, BookSlot},
    repository::{AppointmentStore, CatalogStore},
    scheduling::{availability::conflicts, time::{time_to_minutes, MINUTES_PER_DAY}},
};

#[derive(Clone)]
pub struct BookingsService {
    appointments: Arc<dyn AppointmentStore>,
    catalog: Arc<dyn CatalogStore>,
    availability: AvailabilityService,
    clock: Arc<dyn Clock>,
}

impl BookingsService {
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        catalog: Arc<dyn CatalogStore>,
        availability: AvailabilityService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointments,
            catalog,
            availability,
            clock,
        }
    }

    /// Book a slot. Occupancy is re-read from storage here, whatever the
    /// caller listed before, and the store repeats the check atomically with
    /// the insert.
    pub async fn book_slot(&self, tenant_id: Uuid, request: &BookSlot) -> AppResult<Appointment> {
        let professional = self
            .catalog
            .get_professional(tenant_id, request.professional_id)
            .await?;
        let service = self.catalog.get_service(tenant_id, request.service_id).await?;

        if !professional.offers(service.id) {
            return Err(AppError::Validation(format!(
                "Professional {} does not offer service {}",
                professional.id, service.id
            )));
        }

        let start = time_to_minutes(&request.start_time)?;
        let duration = service_duration(&service)?;
        if start + duration > MINUTES_PER_DAY {
            return Err(AppError::Validation(format!(
                "A {} minute service starting at {} ends after midnight",
                duration, request.start_time
            )));
        }

        if !self
            .availability
            .is_offered(&professional, request.date, &request.start_time, duration)?
        {
            return Err(AppError::Validation(format!(
                "{} {} is not an offered start time for professional {}",
                request.date, request.start_time, professional.id
            )));
        }

        let occupied = self
            .availability
            .load_occupied(tenant_id, request.date, professional.id)
            .await?;
        if conflicts(start, duration, &occupied) {
            tracing::warn!(
                "Slot {} {} taken for professional {}",
                request.date,
                request.start_time,
                professional.id
            );
            return Err(AppError::SlotTaken(format!(
                "{} {} is no longer available",
                request.date, request.start_time
            )));
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            tenant_id,
            professional_id: professional.id,
            service_id: service.id,
            date: request.date,
            start_time: request.start_time.clone(),
            duration_minutes: service.duration_minutes,
            status: AppointmentStatus::Active,
            client_id: request.client_id,
            price: service.price,
            created_at: self.clock.now_utc(),
        };

        self.appointments.insert_if_free(&appointment).await?;

        tracing::info!(
            "Booked appointment {} for professional {} on {} at {}",
            appointment.id,
            appointment.professional_id,
            appointment.date,
            appointment.start_time
        );

        Ok(appointment)
    }

    /// Appointments of a day, any status
    pub async fn list_day(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
        professional_id: Option<Uuid>,
    ) -> AppResult<Vec<Appointment>> {
        let mut appointments = self
            .appointments
            .list_for_day(tenant_id, date, professional_id)
            .await?;
        appointments.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(appointments)
    }

    pub async fn cancel(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Appointment> {
        self.transition(tenant_id, id, AppointmentStatus::Cancelled).await
    }

    pub async fn complete(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Appointment> {
        self.transition(tenant_id, id, AppointmentStatus::Completed).await
    }

    async fn transition(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: AppointmentStatus,
    ) -> AppResult<Appointment> {
        // The store checks the current status atomically with the write
        let updated = self
            .appointments
            .update_status_if_active(tenant_id, id, status)
            .await?;
        tracing::info!("Appointment {} marked {}", id, status.as_str());
        Ok(updated)
    }
}
