//! Gateway error types with HTTP status code mapping.
//!
//! [`HubError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! The unmatched-route fallback is deliberately outside this envelope and
//! lives in [`crate::api::not_found`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "document not found: hub/missing.md",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`HubError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                   |
/// |-----------|-----------------|-------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request               |
/// | 2000–2999 | Not Found       | 404 Not Found                 |
/// | 3000–3999 | Server/Upstream | 500 / 502 / 504               |
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A branch or slug path segment failed validation.
    #[error("invalid {kind}: {value:?}")]
    InvalidIdentifier {
        /// Which identifier was rejected (`"branch"` or `"slug"`).
        kind: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// The upstream host answered 404 for the requested document.
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// The manifest has no navigation section with the configured name.
    #[error("navigation section not found: {0}")]
    NavSectionMissing(String),

    /// Upstream transport failure or non-success status.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Upstream request exceeded the configured timeout.
    #[error("upstream request timed out")]
    UpstreamTimeout,

    /// The fetched `mkdocs.yml` could not be parsed.
    #[error("manifest parse error: {0}")]
    ManifestParse(String),

    /// Analytics store failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HubError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidIdentifier { .. } => 1002,
            Self::DocumentNotFound(_) => 2001,
            Self::NavSectionMissing(_) => 2002,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::Upstream(_) => 3002,
            Self::UpstreamTimeout => 3003,
            Self::ManifestParse(_) => 3004,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
            Self::DocumentNotFound(_) | Self::NavSectionMissing(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::ManifestParse(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for HubError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
