//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the HTTP surface. Each variant
//! maps to a specific HTTP status code and a flat JSON error body. Store
//! failures carry a fixed, per-operation message so that nothing about the
//! database leaks to clients unless the operation opts into `details`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": "Error uploading photo",
///   "code": 3001,
///   "details": "connection refused"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Numeric error code (see [`ApiError::error_code`]).
    pub code: u32,
    /// Raw failure detail, present on photo endpoints only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 2000–2999 | Not Found  | 404 Not Found             |
/// | 3000–3999 | Server     | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// `voteType` was missing or not one of `upvote` / `downvote`.
    #[error("Invalid vote type")]
    InvalidVoteType,

    /// The upload request carried no `photo` file part.
    #[error("No file uploaded")]
    MissingPhoto,

    /// The request body could not be decoded.
    #[error("{0}")]
    InvalidRequest(String),

    /// No venue matches the requested id.
    #[error("Venue not found")]
    VenueNotFound,

    /// No route matches the request.
    #[error("Not found")]
    RouteNotFound,

    /// The store or file store failed.
    #[error("{message}")]
    Store {
        /// Fixed message naming the failed operation.
        message: &'static str,
        /// Raw failure text, exposed only where the endpoint allows it.
        details: Option<String>,
    },

    /// Anything that escaped a handler.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Store failure with a fixed message and no diagnostic detail.
    #[must_use]
    pub const fn store(message: &'static str) -> Self {
        Self::Store {
            message,
            details: None,
        }
    }

    /// Store failure that also reports the underlying error text.
    #[must_use]
    pub fn store_with_details(message: &'static str, source: &dyn std::error::Error) -> Self {
        Self::Store {
            message,
            details: Some(source.to_string()),
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidVoteType => 1002,
            Self::MissingPhoto => 1003,
            Self::VenueNotFound => 2001,
            Self::RouteNotFound => 2000,
            Self::Internal(_) => 3000,
            Self::Store { .. } => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidVoteType | Self::MissingPhoto => {
                StatusCode::BAD_REQUEST
            }
            Self::VenueNotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Store { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let error = self.to_string();
        let details = match self {
            Self::Store { details, .. } => details,
            Self::Internal(details) => Some(details),
            _ => None,
        };
        let body = ErrorResponse {
            error,
            code,
            details,
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
