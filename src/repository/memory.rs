//! In-memory store, used by tests and local demos

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::{AppointmentStore, CatalogStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        appointment::{Appointment, AppointmentStatus},
        professional::{CreateProfessional, Professional},
        service::{CreateService, Service},
        working_hours::{SpecialDate, WorkingHours},
    },
    scheduling::{availability::conflicts, time::time_to_minutes, OccupiedInterval},
};

#[derive(Default)]
struct State {
    appointments: Vec<Appointment>,
    professionals: HashMap<Uuid, Professional>,
    services: HashMap<Uuid, Service>,
}

/// Both storage traits over process memory. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AppError::Storage("in-memory store poisoned".to_string()))
    }

    /// Insert a professional as-is
    pub fn put_professional(&self, professional: Professional) -> AppResult<()> {
        self.lock()?.professionals.insert(professional.id, professional);
        Ok(())
    }

    /// Insert a service as-is
    pub fn put_service(&self, service: Service) -> AppResult<()> {
        self.lock()?.services.insert(service.id, service);
        Ok(())
    }

    /// Insert an appointment without any availability check
    pub fn put_appointment(&self, appointment: Appointment) -> AppResult<()> {
        self.lock()?.appointments.push(appointment);
        Ok(())
    }
}

fn occupied_by(appointments: &[&Appointment]) -> AppResult<Vec<OccupiedInterval>> {
    appointments
        .iter()
        .map(|a| {
            let start = time_to_minutes(&a.start_time)?;
            Ok(OccupiedInterval::new(start, start + a.duration_minutes.max(0) as u32))
        })
        .collect()
}

#[async_trait]
impl AppointmentStore for InMemoryStore {
    async fn list_active(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
        professional_id: Uuid,
    ) -> AppResult<Vec<Appointment>> {
        let state = self.lock()?;
        Ok(state
            .appointments
            .iter()
            .filter(|a| {
                a.tenant_id == tenant_id
                    && a.date == date
                    && a.professional_id == professional_id
                    && a.status == AppointmentStatus::Active
            })
            .cloned()
            .collect())
    }

    async fn list_for_day(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
        professional_id: Option<Uuid>,
    ) -> AppResult<Vec<Appointment>> {
        let state = self.lock()?;
        let mut day = state
            .appointments
            .iter()
            .filter(|a| {
                a.tenant_id == tenant_id
                    && a.date == date
                    && professional_id.map_or(true, |pid| a.professional_id == pid)
            })
            .cloned()
            .collect::<Vec<_>>();
        day.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(day)
    }

    async fn get(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Appointment> {
        let state = self.lock()?;
        state
            .appointments
            .iter()
            .find(|a| a.tenant_id == tenant_id && a.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", id)))
    }

    async fn insert_if_free(&self, appointment: &Appointment) -> AppResult<()> {
        let mut state = self.lock()?;

        let same_day: Vec<&Appointment> = state
            .appointments
            .iter()
            .filter(|a| {
                a.tenant_id == appointment.tenant_id
                    && a.professional_id == appointment.professional_id
                    && a.date == appointment.date
                    && a.status == AppointmentStatus::Active
            })
            .collect();
        let occupied = occupied_by(&same_day)?;

        let start = time_to_minutes(&appointment.start_time)?;
        if conflicts(start, appointment.duration_minutes.max(0) as u32, &occupied) {
            return Err(AppError::SlotTaken(format!(
                "{} {} already booked for professional {}",
                appointment.date, appointment.start_time, appointment.professional_id
            )));
        }

        state.appointments.push(appointment.clone());
        Ok(())
    }

    async fn update_status_if_active(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: AppointmentStatus,
    ) -> AppResult<Appointment> {
        let mut state = self.lock()?;
        let appointment = state
            .appointments
            .iter_mut()
            .find(|a| a.tenant_id == tenant_id && a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", id)))?;
        if appointment.status != AppointmentStatus::Active {
            return Err(AppError::BusinessRule(format!(
                "Appointment {} is already {}",
                id,
                appointment.status.as_str()
            )));
        }
        appointment.status = status;
        Ok(appointment.clone())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn get_professional(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Professional> {
        let state = self.lock()?;
        state
            .professionals
            .get(&id)
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Professional {} not found", id)))
    }

    async fn list_professionals(&self, tenant_id: Uuid) -> AppResult<Vec<Professional>> {
        let state = self.lock()?;
        let mut list: Vec<Professional> = state
            .professionals
            .values()
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn create_professional(
        &self,
        tenant_id: Uuid,
        data: &CreateProfessional,
    ) -> AppResult<Professional> {
        let professional = Professional {
            id: Uuid::new_v4(),
            tenant_id,
            name: data.name.clone(),
            working_hours: data.working_hours.clone(),
            special_dates: Vec::new(),
            service_ids: data.service_ids.clone(),
            created_at: Some(Utc::now()),
        };
        self.lock()?
            .professionals
            .insert(professional.id, professional.clone());
        Ok(professional)
    }

    async fn update_working_hours(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        hours: &WorkingHours,
    ) -> AppResult<Professional> {
        let mut state = self.lock()?;
        let professional = state
            .professionals
            .get_mut(&id)
            .filter(|p| p.tenant_id == tenant_id)
            .ok_or_else(|| AppError::NotFound(format!("Professional {} not found", id)))?;
        professional.working_hours = hours.clone();
        Ok(professional.clone())
    }

    async fn update_special_dates(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        special_dates: &[SpecialDate],
    ) -> AppResult<Professional> {
        let mut state = self.lock()?;
        let professional = state
            .professionals
            .get_mut(&id)
            .filter(|p| p.tenant_id == tenant_id)
            .ok_or_else(|| AppError::NotFound(format!("Professional {} not found", id)))?;
        professional.special_dates = special_dates.to_vec();
        Ok(professional.clone())
    }

    async fn get_service(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Service> {
        let state = self.lock()?;
        state
            .services
            .get(&id)
            .filter(|s| s.tenant_id == tenant_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))
    }

    async fn list_services(&self, tenant_id: Uuid, storefront_only: bool) -> AppResult<Vec<Service>> {
        let state = self.lock()?;
        let mut list: Vec<Service> = state
            .services
            .values()
            .filter(|s| s.tenant_id == tenant_id && (!storefront_only || s.visible_in_storefront))
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn create_service(&self, tenant_id: Uuid, data: &CreateService) -> AppResult<Service> {
        let service = Service {
            id: Uuid::new_v4(),
            tenant_id,
            name: data.name.clone(),
            price: data.price,
            duration_minutes: data.duration_minutes,
            visible_in_storefront: data.visible_in_storefront,
            created_at: Some(Utc::now()),
        };
        self.lock()?.services.insert(service.id, service.clone());
        Ok(service)
    }
}
