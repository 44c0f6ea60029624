//! Response types for the Payroll Engine API.
//!
//! This module defines the error response structures and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status code.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::EmployeeNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, ApiError::new("EMPLOYEE_NOT_FOUND", message))
            }
            EngineError::PayrollNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, ApiError::new("PAYROLL_NOT_FOUND", message))
            }
            EngineError::DuplicatePeriod { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "DUPLICATE_PERIOD",
                    message,
                    "A payroll record for this employee and month already exists and was left unchanged",
                ),
            ),
            EngineError::InvalidApprovalState { status, .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_APPROVAL_STATE",
                    message,
                    format!("Only draft payrolls can be approved; current status is {}", status),
                ),
            ),
            EngineError::InvalidRequest { field, .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details("VALIDATION_ERROR", message, field),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                )
            }
            EngineError::Storage { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORAGE_ERROR", "Storage error", message),
            ),
        }
    }
}

/// Body of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` when the server answers.
    pub status: String,
    /// Server time of the check.
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Builds a healthy response stamped with the current time.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}
