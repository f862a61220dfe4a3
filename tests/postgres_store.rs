//! Postgres store tests (need a live database)
//!
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use agenda_server::{
    error::AppError,
    models::{
        appointment::{Appointment, AppointmentStatus},
        professional::CreateProfessional,
        working_hours::WorkingHours,
    },
    repository::{AppointmentStore, CatalogStore, Repository},
};

async fn repository() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Repository::new(pool)
}

/// A fresh tenant with one professional
async fn professional(repo: &Repository) -> (Uuid, Uuid) {
    let tenant_id = Uuid::new_v4();
    let created = repo
        .catalog
        .create_professional(
            tenant_id,
            &CreateProfessional {
                name: "Ana".to_string(),
                working_hours: WorkingHours::default(),
                service_ids: Vec::new(),
            },
        )
        .await
        .expect("Failed to create professional");
    (tenant_id, created.id)
}

fn appointment(tenant_id: Uuid, professional_id: Uuid, start: &str, duration: i32) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        tenant_id,
        professional_id,
        service_id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        start_time: start.to_string(),
        duration_minutes: duration,
        status: AppointmentStatus::Active,
        client_id: Uuid::new_v4(),
        price: Decimal::new(4500, 2),
        created_at: Utc::now(),
    }
}

#[tokio::test]
#[ignore]
async fn test_insert_if_free_rejects_overlap() {
    let repo = repository().await;
    let (tenant_id, professional_id) = professional(&repo).await;

    repo.appointments
        .insert_if_free(&appointment(tenant_id, professional_id, "10:00", 60))
        .await
        .unwrap();

    let clash = repo
        .appointments
        .insert_if_free(&appointment(tenant_id, professional_id, "10:30", 30))
        .await;
    assert!(matches!(clash, Err(AppError::SlotTaken(_))));

    repo.appointments
        .insert_if_free(&appointment(tenant_id, professional_id, "11:00", 30))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn test_concurrent_inserts_keep_one() {
    let repo = Arc::new(repository().await);
    let (tenant_id, professional_id) = professional(&repo).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = repo.clone();
        let candidate = appointment(tenant_id, professional_id, "14:00", 30);
        handles.push(tokio::spawn(async move {
            repo.appointments.insert_if_free(&candidate).await
        }));
    }

    let mut inserted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => inserted += 1,
            Err(e) => assert!(matches!(e, AppError::SlotTaken(_))),
        }
    }
    assert_eq!(inserted, 1);

    let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let active = repo
        .appointments
        .list_active(tenant_id, date, professional_id)
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_status_update_only_from_active() {
    let repo = repository().await;
    let (tenant_id, professional_id) = professional(&repo).await;
    let booked = appointment(tenant_id, professional_id, "09:00", 30);
    repo.appointments.insert_if_free(&booked).await.unwrap();

    let done = repo
        .appointments
        .update_status_if_active(tenant_id, booked.id, AppointmentStatus::Completed)
        .await
        .unwrap();
    assert_eq!(done.status, AppointmentStatus::Completed);

    let late = repo
        .appointments
        .update_status_if_active(tenant_id, booked.id, AppointmentStatus::Cancelled)
        .await;
    assert!(matches!(late, Err(AppError::BusinessRule(_))));

    let missing = repo
        .appointments
        .update_status_if_active(tenant_id, Uuid::new_v4(), AppointmentStatus::Cancelled)
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
