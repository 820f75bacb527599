//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the single error type returned by the service layer and
//! the handlers. It is converted into an HTTP response exactly once, at the
//! axum boundary, via [`IntoResponse`].

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::persistence::StoreError;

/// Message returned to clients for every [`ApiError::Internal`].
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Message returned when a request body cannot be decoded.
pub const MALFORMED_BODY_MESSAGE: &str = "malformed request body";

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "equipment ID must be exactly 5 characters (got 3)"
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
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// A precondition checked before an equipment mutation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The identifier does not have exactly five characters.
    #[error("equipment ID must be exactly 5 characters (got {len})")]
    InvalidIdLength {
        /// Character count of the rejected identifier.
        len: usize,
    },

    /// No equipment type exists with the referenced ID.
    #[error("unknown equipment type: {0}")]
    UnknownType(i32),

    /// Other records still reference the equipment.
    #[error("equipment {id} is still referenced by {references} checklist(s)")]
    StillReferenced {
        /// Equipment identifier.
        id: String,
        /// Number of referencing records found.
        references: u64,
    },
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1099 | Validation      | 400 Bad Request              |
/// | 1401      | Authentication  | 401 Unauthorized             |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A mutation precondition failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request is malformed for the addressed resource.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid bearer token.
    #[error("missing or invalid bearer token")]
    Unauthorized,

    /// Equipment with the given ID was not found.
    #[error("equipment not found: {0}")]
    NotFound(String),

    /// Equipment with the given ID already exists.
    #[error("equipment already exists: {0}")]
    Conflict(String),

    /// Unclassified failure. The detail is logged, never sent to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(ValidationError::InvalidIdLength { .. }) => 1001,
            Self::Validation(ValidationError::UnknownType(_)) => 1002,
            Self::Validation(ValidationError::StillReferenced { .. }) => 1003,
            Self::BadRequest(_) => 1004,
            Self::Unauthorized => 1401,
            Self::NotFound(_) => 2001,
            Self::Conflict(_) => 2002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message sent to the client.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(detail = %rejection.body_text(), "rejected request body");
        Self::BadRequest(MALFORMED_BODY_MESSAGE.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Internal(detail) = &self {
            tracing::error!(%detail, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
