//! Appointment endpoints: booking, day listing, status changes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::appointment::{Appointment, BookSlot, DayQuery},
};

/// Book a slot
#[utoipa::path(
    post,
    path = "/tenants/{tenant_id}/appointments",
    tag = "appointments",
    params(("tenant_id" = Uuid, Path, description = "Tenant ID")),
    request_body = BookSlot,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 409, description = "Slot was just booked", body = crate::error::ErrorResponse)
    )
)]
pub async fn book(
    State(state): State<crate::AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(data): Json<BookSlot>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let appointment = state.services.bookings.book_slot(tenant_id, &data).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// List a day's appointments
#[utoipa::path(
    get,
    path = "/tenants/{tenant_id}/appointments",
    tag = "appointments",
    params(("tenant_id" = Uuid, Path, description = "Tenant ID"), DayQuery),
    responses(
        (status = 200, description = "Appointments of the day", body = Vec<Appointment>)
    )
)]
pub async fn list_day(
    State(state): State<crate::AppState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<Vec<Appointment>>> {
    let appointments = state
        .services
        .bookings
        .list_day(tenant_id, query.date, query.professional_id)
        .await?;
    Ok(Json(appointments))
}

/// Cancel an active appointment
#[utoipa::path(
    post,
    path = "/tenants/{tenant_id}/appointments/{id}/cancel",
    tag = "appointments",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Appointment cancelled", body = Appointment),
        (status = 422, description = "Appointment is not active", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel(
    State(state): State<crate::AppState>,
    Path((tenant_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Appointment>> {
    let appointment = state.services.bookings.cancel(tenant_id, id).await?;
    Ok(Json(appointment))
}

/// Mark an active appointment as completed
#[utoipa::path(
    post,
    path = "/tenants/{tenant_id}/appointments/{id}/complete",
    tag = "appointments",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Appointment completed", body = Appointment),
        (status = 422, description = "Appointment is not active", body = crate::error::ErrorResponse)
    )
)]
pub async fn complete(
    State(state): State<crate::AppState>,
    Path((tenant_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Appointment>> {
    let appointment = state.services.bookings.complete(tenant_id, id).await?;
    Ok(Json(appointment))
}
