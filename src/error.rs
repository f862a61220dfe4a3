//! Error types for the Agenda server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message shown for failures the user can only retry
pub const TRY_AGAIN_MESSAGE: &str = "Não foi possível concluir a operação. Tente novamente.";

/// Message shown when a slot was booked between listing and booking
pub const SLOT_TAKEN_MESSAGE: &str = "Este horário acabou de ser reservado. Escolha outro horário.";

/// Application error codes exposed in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    NoSuchData = 2,
    BadValue = 3,
    InvalidTime = 4,
    StorageFailure = 5,
    SlotTaken = 6,
    BusinessRule = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid time format: {0}")]
    Format(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Slot taken: {0}")]
    SlotTaken(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),
}

impl AppError {
    /// Whether the caller should re-fetch availability and re-prompt the user
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::SlotTaken(_))
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Format(msg) => {
                tracing::warn!("Rejected malformed time: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidTime,
                    TRY_AGAIN_MESSAGE.to_string(),
                )
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::StorageFailure,
                    TRY_AGAIN_MESSAGE.to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::StorageFailure,
                    TRY_AGAIN_MESSAGE.to_string(),
                )
            }
            AppError::SlotTaken(msg) => {
                tracing::info!("Slot taken: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorCode::SlotTaken,
                    SLOT_TAKEN_MESSAGE.to_string(),
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::BusinessRule, msg.clone())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Format("9h".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Storage("down".into()), StatusCode::SERVICE_UNAVAILABLE),
            (AppError::SlotTaken("x".into()), StatusCode::CONFLICT),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::BusinessRule("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_only_slot_taken_is_recoverable() {
        assert!(AppError::SlotTaken("x".into()).is_recoverable());
        assert!(!AppError::Storage("x".into()).is_recoverable());
        assert!(!AppError::BusinessRule("x".into()).is_recoverable());
    }
}
