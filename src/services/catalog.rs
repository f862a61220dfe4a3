//! Professionals and services catalog

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        professional::{CreateProfessional, Professional},
        service::{CreateService, Service},
        working_hours::{SpecialDate, WorkingHours},
    },
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    // ---- Professionals ----

    pub async fn list_professionals(&self, tenant_id: Uuid) -> AppResult<Vec<Professional>> {
        self.catalog.list_professionals(tenant_id).await
    }

    pub async fn get_professional(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Professional> {
        self.catalog.get_professional(tenant_id, id).await
    }

    pub async fn create_professional(
        &self,
        tenant_id: Uuid,
        data: &CreateProfessional,
    ) -> AppResult<Professional> {
        data.validate()?;
        data.working_hours.ensure_valid()?;
        for service_id in &data.service_ids {
            self.catalog.get_service(tenant_id, *service_id).await?;
        }
        let professional = self.catalog.create_professional(tenant_id, data).await?;
        tracing::info!("Created professional {} for tenant {}", professional.id, tenant_id);
        Ok(professional)
    }

    /// Replace the weekly template. Unlike loading, editing rejects any block
    /// problem.
    pub async fn update_working_hours(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        hours: &WorkingHours,
    ) -> AppResult<Professional> {
        hours.ensure_valid()?;
        self.catalog.update_working_hours(tenant_id, id, hours).await
    }

    pub async fn update_special_dates(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        special_dates: &[SpecialDate],
    ) -> AppResult<Professional> {
        for special in special_dates {
            special.validate()?;
        }
        self.catalog.update_special_dates(tenant_id, id, special_dates).await
    }

    // ---- Services ----

    pub async fn list_services(&self, tenant_id: Uuid, storefront_only: bool) -> AppResult<Vec<Service>> {
        self.catalog.list_services(tenant_id, storefront_only).await
    }

    pub async fn get_service(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Service> {
        self.catalog.get_service(tenant_id, id).await
    }

    pub async fn create_service(&self, tenant_id: Uuid, data: &CreateService) -> AppResult<Service> {
        data.validate()?;
        if data.price < Decimal::ZERO {
            return Err(AppError::Validation("Price cannot be negative".to_string()));
        }
        let service = self.catalog.create_service(tenant_id, data).await?;
        tracing::info!("Created service {} for tenant {}", service.id, tenant_id);
        Ok(service)
    }
}
