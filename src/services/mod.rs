//! Business logic services

pub mod availability;
pub mod bookings;
pub mod catalog;
pub mod insights;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use crate::{
    clock::Clock,
    config::SchedulingConfig,
    repository::{AppointmentStore, CatalogStore},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub bookings: bookings::BookingsService,
    pub catalog: catalog::CatalogService,
    pub insights: insights::InsightsService,
}

impl Services {
    /// Create all services over the given stores
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        catalog: Arc<dyn CatalogStore>,
        clock: Arc<dyn Clock>,
        scheduling: SchedulingConfig,
    ) -> Self {
        let availability = availability::AvailabilityService::new(
            appointments.clone(),
            catalog.clone(),
            clock.clone(),
            scheduling,
        );

        Self {
            bookings: bookings::BookingsService::new(
                appointments.clone(),
                catalog.clone(),
                availability.clone(),
                clock,
            ),
            insights: insights::InsightsService::new(appointments, catalog.clone()),
            catalog: catalog::CatalogService::new(catalog),
            availability,
        }
    }
}
