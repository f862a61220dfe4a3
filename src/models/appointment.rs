//! Appointment model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Active,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Active => "active",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AppointmentStatus::Active),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(format!("unknown appointment status '{}'", other)),
        }
    }
}

/// A booked slot. Price and duration are snapshots of the service at booking time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    /// Start time (HH:MM)
    pub start_time: String,
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    pub client_id: Uuid,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for Appointment {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = status.parse().map_err(|e: String| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: e.into(),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            tenant_id: row.try_get("tenant_id")?,
            professional_id: row.try_get("professional_id")?,
            service_id: row.try_get("service_id")?,
            date: row.try_get("date")?,
            start_time: row.try_get("start_time")?,
            duration_minutes: row.try_get("duration_minutes")?,
            status,
            client_id: row.try_get("client_id")?,
            price: row.try_get("price")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Booking request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BookSlot {
    pub professional_id: Uuid,
    pub service_id: Uuid,
    /// Date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Start time (HH:MM)
    pub start_time: String,
    pub client_id: Uuid,
}

/// Query parameters for a day's appointments
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DayQuery {
    /// Day (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Restrict to one professional
    pub professional_id: Option<Uuid>,
}
