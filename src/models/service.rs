//! Bookable service model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A service offered by a business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Service {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub duration_minutes: i32,
    /// Listed in the public storefront
    pub visible_in_storefront: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create service request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateService {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    #[validate(range(min = 1, max = 720))]
    pub duration_minutes: i32,
    #[serde(default = "default_visible")]
    pub visible_in_storefront: bool,
}

fn default_visible() -> bool {
    true
}

/// Query parameters for service listings
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ServiceQuery {
    /// Only services shown in the storefront
    #[serde(default)]
    pub storefront: bool,
}
