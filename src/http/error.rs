//! API error type.
//!
//! Maps handler failures to HTTP status codes and a JSON error body.
//! Server-side failures are logged; their details are not returned.

use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::InvalidPrice;
use crate::observability::metrics;
use crate::reactive::LoggingSideEffectError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed path parameter (400).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A log action failed before the response was committed (500).
    #[error(transparent)]
    LoggingSideEffect(#[from] LoggingSideEffectError),
}

impl From<InvalidPrice> for ApiError {
    fn from(err: InvalidPrice) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            Self::LoggingSideEffect(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "LOGGING_SIDE_EFFECT")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::LoggingSideEffect(_) => {
                tracing::error!(error = %self, "Request aborted by failing log action");
                metrics::record_log_failure();
                "An internal error occurred".to_string()
            }
            other => {
                tracing::debug!(error = %other, "Rejected request");
                other.to_string()
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{LogActionError, Stage};

    #[test]
    fn test_status_mapping() {
        let bad = ApiError::from(InvalidPrice::Negative(-1.0));
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);

        let failed = ApiError::from(LoggingSideEffectError {
            stage: Stage::Start,
            source: LogActionError::new("boom"),
        });
        assert_eq!(
            failed.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
