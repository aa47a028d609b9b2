use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::application::errors::{CatalogError, ErrorCode};

/// Map an error code to its wire status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidData => StatusCode::BAD_REQUEST,
        ErrorCode::ResourceConflict => StatusCode::CONFLICT,
        ErrorCode::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a raw code string to its wire status; unknown codes are 500.
pub fn status_for_code(code: &str) -> StatusCode {
    status_for(ErrorCode::from_code(code))
}

/// Field error details
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub code: ErrorCode,
    pub message: String,
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: ErrorCode,
    message: String,
    field_errors: Vec<FieldError>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: status_for(code),
            code,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// Invalid request whose body exceeded the configured size limit
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            ..Self::new(ErrorCode::InvalidData, message)
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidData, message)
    }

    pub fn internal_error() -> Self {
        Self::new(ErrorCode::Unexpected, "Internal server error")
    }

    /// Build a 400 from `validator` failures, one entry per field message
    pub fn validation(errors: &ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|cow| cow.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        Self {
            field_errors,
            ..Self::new(ErrorCode::InvalidData, "Validation failed")
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            status_code: status.as_u16(),
            code: self.code,
            message: self.message,
            error: self.code.short_message().to_string(),
            field_errors: self.field_errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Unexpected(detail) => {
                // Detail stays in the logs only
                tracing::error!(error = %detail, "unexpected catalog failure");
                ApiError::internal_error()
            }
            other => ApiError::new(other.code(), other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::payload_too_large(rejection.body_text());
        }
        ApiError::bad_request(rejection.body_text())
    }
}
