//! Slot listing and nearest-available-date endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    services::availability::{FirstAvailable, SlotListing},
};

/// Longest search window a caller may request
const MAX_HORIZON_DAYS: u32 = 366;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SlotsQuery {
    /// Day (YYYY-MM-DD)
    pub date: NaiveDate,
    pub service_id: Uuid,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct FirstAvailableQuery {
    pub service_id: Uuid,
    /// First day to consider (defaults to today, or tomorrow after the cutoff hour)
    pub start_from: Option<NaiveDate>,
    /// Number of days to scan (defaults to the configured horizon)
    pub horizon_days: Option<u32>,
}

/// List free slots of a professional for a service
#[utoipa::path(
    get,
    path = "/tenants/{tenant_id}/professionals/{id}/slots",
    tag = "availability",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("id" = Uuid, Path, description = "Professional ID"),
        SlotsQuery
    ),
    responses(
        (status = 200, description = "Free slots", body = SlotListing),
        (status = 404, description = "Professional or service not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_slots(
    State(state): State<crate::AppState>,
    Path((tenant_id, professional_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<SlotsQuery>,
) -> AppResult<Json<SlotListing>> {
    let listing = state
        .services
        .availability
        .list_slots(tenant_id, professional_id, query.service_id, query.date)
        .await?;
    Ok(Json(listing))
}

/// Find the first date with at least one free slot
#[utoipa::path(
    get,
    path = "/tenants/{tenant_id}/professionals/{id}/first-available",
    tag = "availability",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("id" = Uuid, Path, description = "Professional ID"),
        FirstAvailableQuery
    ),
    responses(
        (status = 200, description = "First available date (null when none)", body = FirstAvailable)
    )
)]
pub async fn first_available(
    State(state): State<crate::AppState>,
    Path((tenant_id, professional_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<FirstAvailableQuery>,
) -> AppResult<Json<FirstAvailable>> {
    if let Some(horizon) = query.horizon_days {
        if horizon == 0 || horizon > MAX_HORIZON_DAYS {
            return Err(AppError::BadRequest(format!(
                "horizon_days must be between 1 and {}",
                MAX_HORIZON_DAYS
            )));
        }
    }

    let result = state
        .services
        .availability
        .first_available(
            tenant_id,
            professional_id,
            query.service_id,
            query.start_from,
            query.horizon_days,
        )
        .await?;
    Ok(Json(result))
}
