//! Professionals and services repository (Postgres)

use async_trait::async_trait;
use sqlx::{types::Json, Pool, Postgres};
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        professional::{CreateProfessional, Professional},
        service::{CreateService, Service},
        working_hours::{SpecialDate, WorkingHours},
    },
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: Pool<Postgres>,
}

impl CatalogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    // ---- Professionals ----

    async fn get_professional(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Professional> {
        sqlx::query_as::<_, Professional>(
            "SELECT * FROM professionals WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Professional {} not found", id)))
    }

    async fn list_professionals(&self, tenant_id: Uuid) -> AppResult<Vec<Professional>> {
        let rows = sqlx::query_as::<_, Professional>(
            "SELECT * FROM professionals WHERE tenant_id = $1 ORDER BY name",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_professional(
        &self,
        tenant_id: Uuid,
        data: &CreateProfessional,
    ) -> AppResult<Professional> {
        let row = sqlx::query_as::<_, Professional>(
            r#"
            INSERT INTO professionals (id, tenant_id, name, working_hours, special_dates, service_ids)
            VALUES ($1, $2, $3, $4, '[]'::jsonb, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(tenant_id)
        .bind(&data.name)
        .bind(Json(&data.working_hours))
        .bind(&data.service_ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_working_hours(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        hours: &WorkingHours,
    ) -> AppResult<Professional> {
        sqlx::query_as::<_, Professional>(
            "UPDATE professionals SET working_hours = $3 WHERE tenant_id = $1 AND id = $2 RETURNING *",
        )
        .bind(tenant_id)
        .bind(id)
        .bind(Json(hours))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Professional {} not found", id)))
    }

    async fn update_special_dates(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        special_dates: &[SpecialDate],
    ) -> AppResult<Professional> {
        sqlx::query_as::<_, Professional>(
            "UPDATE professionals SET special_dates = $3 WHERE tenant_id = $1 AND id = $2 RETURNING *",
        )
        .bind(tenant_id)
        .bind(id)
        .bind(Json(special_dates))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Professional {} not found", id)))
    }

    // ---- Services ----

    async fn get_service(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Service> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))
    }

    async fn list_services(&self, tenant_id: Uuid, storefront_only: bool) -> AppResult<Vec<Service>> {
        let query = if storefront_only {
            "SELECT * FROM services WHERE tenant_id = $1 AND visible_in_storefront ORDER BY name"
        } else {
            "SELECT * FROM services WHERE tenant_id = $1 ORDER BY name"
        };
        let rows = sqlx::query_as::<_, Service>(query)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_service(&self, tenant_id: Uuid, data: &CreateService) -> AppResult<Service> {
        let row = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (id, tenant_id, name, price, duration_minutes, visible_in_storefront)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(tenant_id)
        .bind(&data.name)
        .bind(data.price)
        .bind(data.duration_minutes)
        .bind(data.visible_in_storefront)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
