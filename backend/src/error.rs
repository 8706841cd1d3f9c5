//! Error handling for the Crop Recommender
//!
//! Provides consistent JSON error responses

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{FormError, FormField, PredictionError, UnknownMonth};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("{0}")]
    Form(#[from] FormError),

    #[error(transparent)]
    UnknownMonth(#[from] UnknownMonth),

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // Classifier errors
    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
            missing_fields: Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Form(err @ FormError::MissingFields(_)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    missing_fields: err.missing_labels().iter().map(|s| s.to_string()).collect(),
                    ..ErrorDetail::new("MISSING_FIELDS", err.to_string())
                },
            ),
            AppError::Form(FormError::InvalidValues(errors)) => {
                let field_errors = errors.field_errors();
                let invalid: Vec<FormField> = FormField::ALL
                    .into_iter()
                    .filter(|f| field_errors.contains_key(f.key()))
                    .collect();
                let field = invalid.first().map(|f| f.key().to_string());
                let message = invalid
                    .iter()
                    .flat_map(|f| field_errors[f.key()].iter())
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect::<Vec<_>>()
                    .join("; ");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorDetail {
                        field,
                        ..ErrorDetail::new("VALIDATION_ERROR", message)
                    },
                )
            }
            AppError::UnknownMonth(err) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    field: Some("month".to_string()),
                    ..ErrorDetail::new("UNKNOWN_MONTH", err.to_string())
                },
            ),
            AppError::UnknownRegion(region) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    field: Some("region".to_string()),
                    ..ErrorDetail::new("UNKNOWN_REGION", format!("Region {} not found", region))
                },
            ),
            AppError::InvalidBody(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", msg.clone()),
            ),
            AppError::Prediction(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("PREDICTION_FAILED", format!("Prediction failed: {}", err)),
            ),
        };

        // Client errors are logged at debug level only
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!(code = %error_detail.code, "Request rejected");
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

/// `Json` extractor whose rejections use the JSON error envelope
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
