//! API error handling
//!
//! Engine failures keep their stable code in the `error` field so clients
//! can branch on it without parsing messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain_settlement::EngineError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// HTTP status for an engine failure
pub fn engine_status(err: &EngineError) -> StatusCode {
    match err {
        EngineError::AlreadyRegistered(_)
        | EngineError::PlateAlreadyInsured(_)
        | EngineError::AlreadyClaimed(_)
        | EngineError::TooSoon { .. } => StatusCode::CONFLICT,
        EngineError::NotRegistered(_)
        | EngineError::MissingFields(_)
        | EngineError::PeriodExpired { .. }
        | EngineError::ExceedsMaxPayout { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Banned(_) | EngineError::Unauthorized(_) | EngineError::InvalidCaller { .. } => {
            StatusCode::FORBIDDEN
        }
        EngineError::InvalidPlan(_) | EngineError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
        EngineError::PolicyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::WrongAmount { .. } => StatusCode::PAYMENT_REQUIRED,
        EngineError::TransferFailed(_) | EngineError::Accounting(_) | EngineError::CounterExhausted => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
                None,
            ),
            ApiError::Engine(err) => {
                let details = match err {
                    EngineError::TooSoon { next_allowed, .. } => {
                        Some(vec![format!("next_allowed={}", next_allowed.to_rfc3339())])
                    }
                    _ if err.is_fatal() => Some(vec!["fatal".to_string()]),
                    _ => None,
                };
                (engine_status(err), err.code(), err.to_string(), details)
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}
