//! Repository layer: storage traits and their implementations
//!
//! Services only see `AppointmentStore` and `CatalogStore`; every call returns
//! a fresh snapshot from the backing store.

pub mod appointments;
pub mod catalog;
pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        appointment::{Appointment, AppointmentStatus},
        professional::{CreateProfessional, Professional},
        service::{CreateService, Service},
        working_hours::{SpecialDate, WorkingHours},
    },
};

pub use memory::InMemoryStore;

/// Appointment persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Active appointments of one professional on one date
    async fn list_active(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
        professional_id: Uuid,
    ) -> AppResult<Vec<Appointment>>;

    /// Every appointment of a date, any status
    async fn list_for_day(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
        professional_id: Option<Uuid>,
    ) -> AppResult<Vec<Appointment>>;

    async fn get(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Appointment>;

    /// Conditional write: inserts only if the slot still overlaps no active
    /// appointment of the same professional and date, atomically with the
    /// check. Fails with `AppError::SlotTaken` otherwise.
    async fn insert_if_free(&self, appointment: &Appointment) -> AppResult<()>;

    /// Conditional write: moves an active appointment to `status`, checked
    /// atomically with the update. Fails with `AppError::BusinessRule` when the
    /// appointment is no longer active.
    async fn update_status_if_active(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: AppointmentStatus,
    ) -> AppResult<Appointment>;
}

/// Professionals and services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_professional(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Professional>;

    async fn list_professionals(&self, tenant_id: Uuid) -> AppResult<Vec<Professional>>;

    async fn create_professional(
        &self,
        tenant_id: Uuid,
        data: &CreateProfessional,
    ) -> AppResult<Professional>;

    async fn update_working_hours(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        hours: &WorkingHours,
    ) -> AppResult<Professional>;

    async fn update_special_dates(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        special_dates: &[SpecialDate],
    ) -> AppResult<Professional>;

    async fn get_service(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Service>;

    async fn list_services(&self, tenant_id: Uuid, storefront_only: bool) -> AppResult<Vec<Service>>;

    async fn create_service(&self, tenant_id: Uuid, data: &CreateService) -> AppResult<Service>;
}

/// Postgres-backed repositories sharing one pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub appointments: appointments::AppointmentsRepository,
    pub catalog: catalog::CatalogRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            appointments: appointments::AppointmentsRepository::new(pool.clone()),
            catalog: catalog::CatalogRepository::new(pool.clone()),
            pool,
        }
    }
}
