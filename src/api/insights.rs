//! Daily insights endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::appointment::DayQuery,
    scheduling::insights::{DaySummary, Suggestion},
};

/// Summary of a day's appointments
#[utoipa::path(
    get,
    path = "/tenants/{tenant_id}/insights/daily",
    tag = "insights",
    params(("tenant_id" = Uuid, Path, description = "Tenant ID"), DayQuery),
    responses(
        (status = 200, description = "Daily summary", body = DaySummary)
    )
)]
pub async fn daily_summary(
    State(state): State<crate::AppState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<DaySummary>> {
    let summary = state
        .services
        .insights
        .daily_summary(tenant_id, query.date, query.professional_id)
        .await?;
    Ok(Json(summary))
}

/// Suggestions for a day
#[utoipa::path(
    get,
    path = "/tenants/{tenant_id}/insights/suggestions",
    tag = "insights",
    params(("tenant_id" = Uuid, Path, description = "Tenant ID"), DayQuery),
    responses(
        (status = 200, description = "Suggestions", body = Vec<Suggestion>)
    )
)]
pub async fn daily_suggestions(
    State(state): State<crate::AppState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<Vec<Suggestion>>> {
    let suggestions = state
        .services
        .insights
        .daily_suggestions(tenant_id, query.date, query.professional_id)
        .await?;
    Ok(Json(suggestions))
}
