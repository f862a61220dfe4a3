//! Appointments repository (Postgres)

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::AppointmentStore;
use crate::{
    error::{AppError, AppResult},
    models::appointment::{Appointment, AppointmentStatus},
    scheduling::{availability::conflicts, time::time_to_minutes, OccupiedInterval},
};

#[derive(Clone)]
pub struct AppointmentsRepository {
    pool: Pool<Postgres>,
}

impl AppointmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentStore for AppointmentsRepository {
    async fn list_active(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
        professional_id: Uuid,
    ) -> AppResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT * FROM appointments
            WHERE tenant_id = $1 AND date = $2 AND professional_id = $3 AND status = 'active'
            ORDER BY start_time
            "#,
        )
        .bind(tenant_id)
        .bind(date)
        .bind(professional_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_for_day(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
        professional_id: Option<Uuid>,
    ) -> AppResult<Vec<Appointment>> {
        let mut query = "SELECT * FROM appointments WHERE tenant_id = $1 AND date = $2".to_string();
        if professional_id.is_some() {
            query.push_str(" AND professional_id = $3");
        }
        query.push_str(" ORDER BY start_time, created_at");

        let mut builder = sqlx::query_as::<_, Appointment>(&query)
            .bind(tenant_id)
            .bind(date);
        if let Some(pid) = professional_id {
            builder = builder.bind(pid);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Appointment> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", id)))
    }

    async fn insert_if_free(&self, appointment: &Appointment) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // Serializes writers for one professional and date until commit
        let lock_key = format!(
            "{}:{}:{}",
            appointment.tenant_id, appointment.professional_id, appointment.date
        );
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&lock_key)
            .execute(&mut *tx)
            .await?;

        let booked: Vec<(String, i32)> = sqlx::query_as(
            r#"
            SELECT start_time, duration_minutes FROM appointments
            WHERE tenant_id = $1 AND professional_id = $2 AND date = $3 AND status = 'active'
            "#,
        )
        .bind(appointment.tenant_id)
        .bind(appointment.professional_id)
        .bind(appointment.date)
        .fetch_all(&mut *tx)
        .await?;

        let mut occupied = Vec::with_capacity(booked.len());
        for (start_time, duration) in booked {
            let start = time_to_minutes(&start_time)?;
            occupied.push(OccupiedInterval::new(start, start + duration.max(0) as u32));
        }

        let start = time_to_minutes(&appointment.start_time)?;
        if conflicts(start, appointment.duration_minutes.max(0) as u32, &occupied) {
            // Dropping the transaction rolls it back
            return Err(AppError::SlotTaken(format!(
                "{} {} already booked for professional {}",
                appointment.date, appointment.start_time, appointment.professional_id
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO appointments (
                id, tenant_id, professional_id, service_id, date, start_time,
                duration_minutes, status, client_id, price, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(appointment.id)
        .bind(appointment.tenant_id)
        .bind(appointment.professional_id)
        .bind(appointment.service_id)
        .bind(appointment.date)
        .bind(&appointment.start_time)
        .bind(appointment.duration_minutes)
        .bind(appointment.status.as_str())
        .bind(appointment.client_id)
        .bind(appointment.price)
        .bind(appointment.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn update_status_if_active(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: AppointmentStatus,
    ) -> AppResult<Appointment> {
        let updated = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments SET status = $3
            WHERE tenant_id = $1 AND id = $2 AND status = 'active'
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(appointment) => Ok(appointment),
            // Missing, or moved out of active by someone else
            None => {
                let current = self.get(tenant_id, id).await?;
                Err(AppError::BusinessRule(format!(
                    "Appointment {} is already {}",
                    id,
                    current.status.as_str()
                )))
            }
        }
    }
}
