//! API errors with structured JSON bodies.

use api_shared::{ErrorRes, ValidationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::any::Any;

/// Paths listed in the body of a 404.
pub const AVAILABLE_ENDPOINTS: [&str; 6] = [
    "/api/health",
    "/api/analyze",
    "/api/symptoms/common",
    "/api/conditions/search",
    "/api/emergency/check",
    "/api/health-tips",
];

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body was absent or not valid JSON for the endpoint.
    #[error("No data provided: {0}")]
    MalformedBody(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No symptoms provided")]
    NoSymptoms,
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
    #[error("Endpoint not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("rejecting request: {self}");

        let (status, body) = match self {
            ApiError::MalformedBody(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorRes {
                    error: "No data provided".into(),
                    message: Some(format!(
                        "Please provide symptom data in JSON format ({detail})"
                    )),
                    ..Default::default()
                },
            ),
            ApiError::Validation(ValidationError::MissingFields(fields)) => (
                StatusCode::BAD_REQUEST,
                ErrorRes {
                    error: "Missing required fields".into(),
                    message: Some(format!("Please provide: {}", fields.join(", "))),
                    missing_fields: Some(fields),
                    ..Default::default()
                },
            ),
            ApiError::Validation(ValidationError::Invalid(errors)) => (
                StatusCode::BAD_REQUEST,
                ErrorRes {
                    error: "Validation failed".into(),
                    validation_errors: Some(errors),
                    ..Default::default()
                },
            ),
            ApiError::NoSymptoms => (
                StatusCode::BAD_REQUEST,
                ErrorRes {
                    error: "No symptoms provided".into(),
                    ..Default::default()
                },
            ),
            ApiError::InvalidQuery(message) => (
                StatusCode::BAD_REQUEST,
                ErrorRes {
                    error: "Invalid search query".into(),
                    message: Some(message),
                    ..Default::default()
                },
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorRes {
                    error: "Endpoint not found".into(),
                    message: Some("The requested endpoint does not exist".into()),
                    available_endpoints: Some(
                        AVAILABLE_ENDPOINTS.iter().map(|p| (*p).to_owned()).collect(),
                    ),
                    ..Default::default()
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Turn a handler panic into a JSON 500 instead of a dropped connection.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("request handler panicked: {detail}");

    let body = ErrorRes {
        error: "Internal server error".into(),
        message: Some("An unexpected error occurred. Please try again later.".into()),
        ..Default::default()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
