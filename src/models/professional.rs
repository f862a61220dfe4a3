//! Professional (staff member) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::working_hours::{SpecialDate, WorkingHours};
use crate::error::AppError;

/// A staff member with an individual working-hours template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Professional {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub working_hours: WorkingHours,
    pub special_dates: Vec<SpecialDate>,
    /// Services this professional offers
    pub service_ids: Vec<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Professional {
    pub fn offers(&self, service_id: Uuid) -> bool {
        self.service_ids.contains(&service_id)
    }

    /// Whether a special-date override closes the agenda on `date`
    pub fn is_blocked(&self, date: chrono::NaiveDate) -> bool {
        crate::scheduling::availability::is_blocked(date, &self.special_dates)
    }
}

impl<'r> FromRow<'r, PgRow> for Professional {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let decode = |index: &str, e: String| sqlx::Error::ColumnDecode {
            index: index.to_string(),
            source: e.into(),
        };

        let working_hours: Value = row.try_get("working_hours")?;
        let working_hours = WorkingHours::from_document(&working_hours).map_err(|e: AppError| {
            decode("working_hours", e.to_string())
        })?;

        let special_dates: Value = row.try_get("special_dates")?;
        let special_dates: Vec<SpecialDate> = serde_json::from_value(special_dates)
            .map_err(|e| decode("special_dates", e.to_string()))?;

        Ok(Self {
            id: row.try_get("id")?,
            tenant_id: row.try_get("tenant_id")?,
            name: row.try_get("name")?,
            working_hours,
            special_dates,
            service_ids: row.try_get("service_ids")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Create professional request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProfessional {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    pub working_hours: WorkingHours,
    #[serde(default)]
    pub service_ids: Vec<Uuid>,
}

/// Replace special dates request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateSpecialDates {
    pub special_dates: Vec<SpecialDate>,
}
