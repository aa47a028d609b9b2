//! Error taxonomy shared by every catalog use case
//!
//! All use cases report failure through [`CatalogError`], which has exactly
//! four kinds. Each kind carries a stable [`ErrorCode`] that the transport
//! layer maps to a wire status.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::application::ports::RepositoryError;
use crate::domain::errors::DomainError;

/// Stable, client-visible error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum ErrorCode {
    #[serde(rename = "NF404")]
    NotFound,
    #[serde(rename = "RIE400")]
    InvalidData,
    #[serde(rename = "RC409")]
    ResourceConflict,
    #[serde(rename = "UERR")]
    Unexpected,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NF404",
            ErrorCode::InvalidData => "RIE400",
            ErrorCode::ResourceConflict => "RC409",
            ErrorCode::Unexpected => "UERR",
        }
    }

    pub const fn short_message(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidData => "Resource invalid",
            ErrorCode::ResourceConflict => "Resource conflict",
            ErrorCode::Unexpected => "Unexpected error occurred",
        }
    }

    /// Resolve a code string; anything unrecognised is `Unexpected`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "NF404" => ErrorCode::NotFound,
            "RIE400" => ErrorCode::InvalidData,
            "RC409" => ErrorCode::ResourceConflict,
            _ => ErrorCode::Unexpected,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a catalog use case
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{0}")]
    InvalidData(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unexpected(String),
}

impl CatalogError {
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::NotFound { .. } => ErrorCode::NotFound,
            CatalogError::InvalidData(_) => ErrorCode::InvalidData,
            CatalogError::Conflict(_) => ErrorCode::ResourceConflict,
            CatalogError::Unexpected(_) => ErrorCode::Unexpected,
        }
    }
}

impl From<RepositoryError> for CatalogError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => CatalogError::not_found("Resource", id),
            RepositoryError::Conflict(msg) => CatalogError::Conflict(msg),
            RepositoryError::Database(e) => CatalogError::Unexpected(e.to_string()),
            RepositoryError::Internal(msg) => CatalogError::Unexpected(msg),
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        CatalogError::InvalidData(err.to_string())
    }
}
