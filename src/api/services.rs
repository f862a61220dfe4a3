//! Service catalog endpoints (also backing the storefront listing)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::service::{CreateService, Service, ServiceQuery},
};

/// List services
#[utoipa::path(
    get,
    path = "/tenants/{tenant_id}/services",
    tag = "services",
    params(("tenant_id" = Uuid, Path, description = "Tenant ID"), ServiceQuery),
    responses(
        (status = 200, description = "Services", body = Vec<Service>)
    )
)]
pub async fn list_services(
    State(state): State<crate::AppState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<ServiceQuery>,
) -> AppResult<Json<Vec<Service>>> {
    let services = state
        .services
        .catalog
        .list_services(tenant_id, query.storefront)
        .await?;
    Ok(Json(services))
}

/// Create a service
#[utoipa::path(
    post,
    path = "/tenants/{tenant_id}/services",
    tag = "services",
    params(("tenant_id" = Uuid, Path, description = "Tenant ID")),
    request_body = CreateService,
    responses(
        (status = 201, description = "Service created", body = Service)
    )
)]
pub async fn create_service(
    State(state): State<crate::AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(data): Json<CreateService>,
) -> AppResult<(StatusCode, Json<Service>)> {
    let service = state.services.catalog.create_service(tenant_id, &data).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// Get a service
#[utoipa::path(
    get,
    path = "/tenants/{tenant_id}/services/{id}",
    tag = "services",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("id" = Uuid, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service", body = Service),
        (status = 404, description = "Service not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_service(
    State(state): State<crate::AppState>,
    Path((tenant_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Service>> {
    let service = state.services.catalog.get_service(tenant_id, id).await?;
    Ok(Json(service))
}
