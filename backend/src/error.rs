//! Error handling for the Crop Advisory Platform
//!
//! All failures are handled at the view level and rendered as inline
//! JSON error responses; none terminate the process under normal
//! external-service availability.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use shared::TelemetryError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid session token")]
    InvalidToken,

    #[error("Session not found")]
    SessionNotFound,

    // Navigation errors
    #[error("Invalid page transition: {0}")]
    InvalidStateTransition(String),

    // External service errors
    #[error("Location service unavailable")]
    LocationUnavailable,

    #[error("Feature scaling failed: {0}")]
    ScalingError(String),

    #[error("Seasonal advisor error: {0}")]
    AdvisorError(String),

    // Monitoring errors
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    // Validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<TelemetryError> for AppError {
    fn from(err: TelemetryError) -> Self {
        match err {
            TelemetryError::UnknownCrop(crop) => AppError::UnknownCrop(crop),
            TelemetryError::Distribution(msg) => AppError::Internal(msg),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorDetail {
    fn new(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("INVALID_CREDENTIALS", "Invalid username or password".to_string()),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("INVALID_TOKEN", "Invalid session token".to_string()),
            ),
            AppError::SessionNotFound => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("SESSION_NOT_FOUND", "Session not found or expired".to_string()),
            ),
            AppError::InvalidStateTransition(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::new("INVALID_STATE_TRANSITION", msg.clone()),
            ),
            AppError::LocationUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail::new(
                    "LOCATION_UNAVAILABLE",
                    "Unable to fetch your location. Please try again.".to_string(),
                ),
            ),
            AppError::ScalingError(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::new("SCALING_ERROR", format!("Error during scaling: {}", msg)),
            ),
            AppError::AdvisorError(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail::new("ADVISOR_ERROR", format!("Seasonal advisor error: {}", msg)),
            ),
            AppError::UnknownCrop(crop) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new(
                    "UNKNOWN_CROP",
                    format!("No threshold profile for crop '{}'", crop),
                ),
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", msg.clone()),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource)),
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("CONFIGURATION_ERROR", format!("Configuration error: {}", msg)),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", msg.clone()),
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                ),
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
