//! Daily summary and suggestions service

use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::appointment::{Appointment, AppointmentStatus},
    repository::{AppointmentStore, CatalogStore},
    scheduling::{
        insights::{suggest_for_day, summarize_day, DaySummary, EnrichedAppointment, Suggestion},
        time::time_to_minutes,
    },
};

/// Label for appointments whose service no longer exists
const REMOVED_SERVICE: &str = "Serviço removido";

#[derive(Clone)]
pub struct InsightsService {
    appointments: Arc<dyn AppointmentStore>,
    catalog: Arc<dyn CatalogStore>,
}

impl InsightsService {
    pub fn new(appointments: Arc<dyn AppointmentStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self {
            appointments,
            catalog,
        }
    }

    pub async fn daily_summary(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
        professional_id: Option<Uuid>,
    ) -> AppResult<DaySummary> {
        let day = self.enriched_day(tenant_id, date, professional_id).await?;
        summarize_day(&day)
    }

    pub async fn daily_suggestions(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
        professional_id: Option<Uuid>,
    ) -> AppResult<Vec<Suggestion>> {
        let day = self.enriched_day(tenant_id, date, professional_id).await?;
        suggest_for_day(&day)
    }

    /// Non-cancelled appointments of the day with bounds and service names
    async fn enriched_day(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
        professional_id: Option<Uuid>,
    ) -> AppResult<Vec<EnrichedAppointment>> {
        let appointments = self
            .appointments
            .list_for_day(tenant_id, date, professional_id)
            .await?;

        let names: HashMap<Uuid, String> = self
            .catalog
            .list_services(tenant_id, false)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        appointments
            .iter()
            .filter(|a| a.status != AppointmentStatus::Cancelled)
            .map(|a| enrich(a, &names))
            .collect()
    }
}

fn enrich(appointment: &Appointment, names: &HashMap<Uuid, String>) -> AppResult<EnrichedAppointment> {
    let start = time_to_minutes(&appointment.start_time)?;
    Ok(EnrichedAppointment {
        id: appointment.id,
        start,
        end: start + appointment.duration_minutes.max(0) as u32,
        price: appointment.price,
        service_name: names
            .get(&appointment.service_id)
            .cloned()
            .unwrap_or_else(|| REMOVED_SERVICE.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::appointment::AppointmentStatus,
        scheduling::insights::{SuggestionKind, NO_APPOINTMENTS_MESSAGE},
        services::test_utils::{at, monday, Fixture},
    };
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_empty_day_summary() {
        let fx = Fixture::new();
        let summary = fx
            .services(at(monday(), 7, 0))
            .insights
            .daily_summary(fx.tenant_id, monday(), None)
            .await
            .unwrap();
        assert_eq!(
            summary,
            DaySummary::Empty { total: 0, message: NO_APPOINTMENTS_MESSAGE.to_string() }
        );
    }

    #[tokio::test]
    async fn test_summary_skips_cancelled() {
        let fx = Fixture::new();
        fx.book(monday(), "09:00", 30);
        let mut completed = fx.appointment(monday(), "11:00", 30);
        completed.status = AppointmentStatus::Completed;
        fx.store.put_appointment(completed).unwrap();
        let mut cancelled = fx.appointment(monday(), "15:00", 30);
        cancelled.status = AppointmentStatus::Cancelled;
        fx.store.put_appointment(cancelled).unwrap();

        let summary = fx
            .services(at(monday(), 7, 0))
            .insights
            .daily_summary(fx.tenant_id, monday(), Some(fx.professional.id))
            .await
            .unwrap();

        let DaySummary::Day(day) = summary else {
            panic!("expected a populated summary");
        };
        assert_eq!(day.total, 2);
        assert_eq!(day.revenue, Decimal::new(9000, 2));
        assert_eq!(day.last.start, "11:00");
        assert_eq!(day.top_service.name, "Corte");
        assert_eq!(day.largest_gap.map(|g| g.minutes), Some(90));
    }

    #[tokio::test]
    async fn test_removed_service_label() {
        let fx = Fixture::new();
        let mut orphan = fx.appointment(monday(), "10:00", 30);
        orphan.service_id = Uuid::new_v4();
        fx.store.put_appointment(orphan).unwrap();

        let summary = fx
            .services(at(monday(), 7, 0))
            .insights
            .daily_summary(fx.tenant_id, monday(), None)
            .await
            .unwrap();
        let DaySummary::Day(day) = summary else {
            panic!("expected a populated summary");
        };
        assert_eq!(day.first.service_name, REMOVED_SERVICE);
    }

    #[tokio::test]
    async fn test_suggestions_use_their_own_threshold() {
        let fx = Fixture::new();
        fx.book(monday(), "09:00", 60);
        fx.book(monday(), "10:45", 30);

        let services = fx.services(at(monday(), 7, 0));
        let suggestions = services
            .insights
            .daily_suggestions(fx.tenant_id, monday(), None)
            .await
            .unwrap();
        assert!(suggestions.is_empty());

        fx.book(monday(), "14:00", 30);
        let suggestions = services
            .insights
            .daily_suggestions(fx.tenant_id, monday(), None)
            .await
            .unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::FreeWindow);
    }
}
