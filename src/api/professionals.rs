//! Professional endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        professional::{CreateProfessional, Professional, UpdateSpecialDates},
        working_hours::WorkingHours,
    },
};

/// List professionals
#[utoipa::path(
    get,
    path = "/tenants/{tenant_id}/professionals",
    tag = "professionals",
    params(("tenant_id" = Uuid, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Professionals", body = Vec<Professional>)
    )
)]
pub async fn list_professionals(
    State(state): State<crate::AppState>,
    Path(tenant_id): Path<Uuid>,
) -> AppResult<Json<Vec<Professional>>> {
    let professionals = state.services.catalog.list_professionals(tenant_id).await?;
    Ok(Json(professionals))
}

/// Create a professional
#[utoipa::path(
    post,
    path = "/tenants/{tenant_id}/professionals",
    tag = "professionals",
    params(("tenant_id" = Uuid, Path, description = "Tenant ID")),
    request_body = CreateProfessional,
    responses(
        (status = 201, description = "Professional created", body = Professional)
    )
)]
pub async fn create_professional(
    State(state): State<crate::AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(data): Json<CreateProfessional>,
) -> AppResult<(StatusCode, Json<Professional>)> {
    let professional = state
        .services
        .catalog
        .create_professional(tenant_id, &data)
        .await?;
    Ok((StatusCode::CREATED, Json(professional)))
}

/// Get a professional
#[utoipa::path(
    get,
    path = "/tenants/{tenant_id}/professionals/{id}",
    tag = "professionals",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("id" = Uuid, Path, description = "Professional ID")
    ),
    responses(
        (status = 200, description = "Professional", body = Professional),
        (status = 404, description = "Professional not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_professional(
    State(state): State<crate::AppState>,
    Path((tenant_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Professional>> {
    let professional = state.services.catalog.get_professional(tenant_id, id).await?;
    Ok(Json(professional))
}

/// Replace a professional's working hours
#[utoipa::path(
    put,
    path = "/tenants/{tenant_id}/professionals/{id}/working-hours",
    tag = "professionals",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("id" = Uuid, Path, description = "Professional ID")
    ),
    request_body = WorkingHours,
    responses(
        (status = 200, description = "Working hours updated", body = Professional),
        (status = 400, description = "Invalid blocks", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_working_hours(
    State(state): State<crate::AppState>,
    Path((tenant_id, id)): Path<(Uuid, Uuid)>,
    Json(hours): Json<WorkingHours>,
) -> AppResult<Json<Professional>> {
    let professional = state
        .services
        .catalog
        .update_working_hours(tenant_id, id, &hours)
        .await?;
    Ok(Json(professional))
}

/// Replace a professional's special dates
#[utoipa::path(
    put,
    path = "/tenants/{tenant_id}/professionals/{id}/special-dates",
    tag = "professionals",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("id" = Uuid, Path, description = "Professional ID")
    ),
    request_body = UpdateSpecialDates,
    responses(
        (status = 200, description = "Special dates updated", body = Professional)
    )
)]
pub async fn update_special_dates(
    State(state): State<crate::AppState>,
    Path((tenant_id, id)): Path<(Uuid, Uuid)>,
    Json(data): Json<UpdateSpecialDates>,
) -> AppResult<Json<Professional>> {
    let professional = state
        .services
        .catalog
        .update_special_dates(tenant_id, id, &data.special_dates)
        .await?;
    Ok(Json(professional))
}
