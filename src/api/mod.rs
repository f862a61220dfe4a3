//! API handlers for the Agenda REST endpoints
//!
//! Every business route is scoped by tenant: `/tenants/:tenant_id/...`.

pub mod appointments;
pub mod availability;
pub mod health;
pub mod insights;
pub mod openapi;
pub mod professionals;
pub mod services;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Availability
        .route(
            "/tenants/:tenant_id/professionals/:id/slots",
            get(availability::list_slots),
        )
        .route(
            "/tenants/:tenant_id/professionals/:id/first-available",
            get(availability::first_available),
        )
        // Appointments
        .route(
            "/tenants/:tenant_id/appointments",
            get(appointments::list_day).post(appointments::book),
        )
        .route(
            "/tenants/:tenant_id/appointments/:id/cancel",
            post(appointments::cancel),
        )
        .route(
            "/tenants/:tenant_id/appointments/:id/complete",
            post(appointments::complete),
        )
        // Insights
        .route("/tenants/:tenant_id/insights/daily", get(insights::daily_summary))
        .route(
            "/tenants/:tenant_id/insights/suggestions",
            get(insights::daily_suggestions),
        )
        // Professionals
        .route(
            "/tenants/:tenant_id/professionals",
            get(professionals::list_professionals).post(professionals::create_professional),
        )
        .route(
            "/tenants/:tenant_id/professionals/:id",
            get(professionals::get_professional),
        )
        .route(
            "/tenants/:tenant_id/professionals/:id/working-hours",
            put(professionals::update_working_hours),
        )
        .route(
            "/tenants/:tenant_id/professionals/:id/special-dates",
            put(professionals::update_special_dates),
        )
        // Services
        .route(
            "/tenants/:tenant_id/services",
            get(services::list_services).post(services::create_service),
        )
        .route("/tenants/:tenant_id/services/:id", get(services::get_service))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
