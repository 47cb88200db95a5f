use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

/// Unified error taxonomy for the service layer.
///
/// Inventory-engine failures are recoverable, user-facing validation errors;
/// their display strings are surfaced verbatim to callers. Storage and
/// serialization failures are internal and genericized at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Please provide {expected} {display_name} number(s)")]
    MissingSans { expected: u32, display_name: String },

    #[error("{san} is invalid ({description})")]
    InvalidSanFormat { san: String, description: String },

    #[error("{0} already exists in system")]
    DuplicateSan(String),

    #[error("{0} not found in system")]
    SanNotFound(String),

    #[error("{san} belongs to {registered_item}, not {requested_item}")]
    SanItemMismatch {
        san: String,
        registered_item: String,
        requested_item: String,
    },

    #[error("Import failed: {0}")]
    ImportParse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Serialization(err.to_string())
    }
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(_) | Self::Serialization(_) | Self::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::AssetNotFound(_) | Self::SanNotFound(_) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::MissingSans { .. }
            | Self::InvalidSanFormat { .. }
            | Self::ImportParse(_)
            | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateSan(_) | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::SanItemMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Serialization(_) | Self::InternalError(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.response_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message,
            timestamp: Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_failures_map_to_client_statuses() {
        assert_eq!(
            ServiceError::AssetNotFound("a-1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::DuplicateSan("12345".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::MissingSans {
                expected: 2,
                display_name: "SAN".into()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::SanItemMismatch {
                san: "12345".into(),
                registered_item: "Laptop 840 G9".into(),
                requested_item: "Laptop 840 G10".into(),
            }
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn user_facing_messages_are_verbatim() {
        let err = ServiceError::SanItemMismatch {
            san: "12345".into(),
            registered_item: "Laptop 840 G9".into(),
            requested_item: "Laptop 840 G10".into(),
        };
        assert_eq!(
            err.response_message(),
            "12345 belongs to Laptop 840 G9, not Laptop 840 G10"
        );

        let err = ServiceError::MissingSans {
            expected: 3,
            display_name: "SAN".into(),
        };
        assert_eq!(err.response_message(), "Please provide 3 SAN number(s)");
    }

    #[test]
    fn internal_messages_are_genericized() {
        let err = ServiceError::Serialization("bad bytes at offset 12".into());
        assert_eq!(err.response_message(), "Internal server error");
    }
}
