//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{appointments, availability, health, insights, professionals, services};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agenda API",
        version = "1.0.0",
        description = "Multi-tenant appointment scheduling REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Availability
        availability::list_slots,
        availability::first_available,
        // Appointments
        appointments::book,
        appointments::list_day,
        appointments::cancel,
        appointments::complete,
        // Insights
        insights::daily_summary,
        insights::daily_suggestions,
        // Professionals
        professionals::list_professionals,
        professionals::create_professional,
        professionals::get_professional,
        professionals::update_working_hours,
        professionals::update_special_dates,
        // Services
        services::list_services,
        services::create_service,
        services::get_service,
    ),
    components(
        schemas(
            // Availability
            availability::SlotsQuery,
            availability::FirstAvailableQuery,
            crate::services::availability::SlotListing,
            crate::services::availability::FirstAvailable,
            // Appointments
            crate::models::appointment::Appointment,
            crate::models::appointment::AppointmentStatus,
            crate::models::appointment::BookSlot,
            crate::models::appointment::DayQuery,
            // Insights
            crate::scheduling::insights::DaySummary,
            crate::scheduling::insights::DayOverview,
            crate::scheduling::insights::AppointmentMark,
            crate::scheduling::insights::Gap,
            crate::scheduling::insights::PeakHour,
            crate::scheduling::insights::TopService,
            crate::scheduling::insights::Suggestion,
            crate::scheduling::insights::SuggestionKind,
            // Professionals
            crate::models::professional::Professional,
            crate::models::professional::CreateProfessional,
            crate::models::professional::UpdateSpecialDates,
            crate::models::working_hours::WorkingHours,
            crate::models::working_hours::DaySchedule,
            crate::models::working_hours::TimeBlock,
            crate::models::working_hours::Weekday,
            crate::models::working_hours::SpecialDate,
            // Services
            crate::models::service::Service,
            crate::models::service::CreateService,
            crate::models::service::ServiceQuery,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Free slots and nearest available date"),
        (name = "appointments", description = "Booking and appointment lifecycle"),
        (name = "insights", description = "Daily summary and suggestions"),
        (name = "professionals", description = "Professionals and their agendas"),
        (name = "services", description = "Service catalog")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
