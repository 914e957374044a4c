//! Wire contract: response bodies, error taxonomy, rate limit headers.
//!
//! # Design Decisions
//! - Client-fault rejections carry their exact reason; internal failures
//!   carry a fixed generic message and never leak backend detail
//! - Rate limit denials are routine, not failures: 429 with the window
//!   reset in both the body (ISO-8601) and headers (epoch milliseconds)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::submission::ValidationError;

/// Body of a successful submission response.
#[derive(Debug, Serialize)]
pub struct SubmissionAccepted {
    pub success: bool,
    pub message: &'static str,
    pub id: Uuid,
}

impl SubmissionAccepted {
    pub fn new(id: Uuid) -> Self {
        Self {
            success: true,
            message: "Form submitted successfully!",
            id,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,

    /// Present only on rate limit denials: when the window resets.
    #[serde(rename = "resetTime", skip_serializing_if = "Option::is_none")]
    pub reset_time: Option<String>,
}

impl ErrorBody {
    fn new(error: String) -> Self {
        Self {
            error,
            reset_time: None,
        }
    }
}

/// Everything the submission endpoint can answer with besides success.
/// Display strings are the wire-visible `error` fields.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller's fault; the reason is surfaced verbatim.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Client exhausted its submission window.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited { limit: u32, reset_at_ms: u64 },

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Persistence refused the record. Detail stays in the server log.
    #[error("Failed to submit form. Please try again.")]
    Storage,

    /// Malformed body or other unexpected failure. Detail stays in the
    /// server log.
    #[error("Internal server error. Please try again.")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::RateLimited { limit, reset_at_ms } => (
                StatusCode::TOO_MANY_REQUESTS,
                rate_limit_headers(limit, 0, reset_at_ms),
                Json(ErrorBody {
                    error: message,
                    reset_time: Some(iso8601(reset_at_ms)),
                }),
            )
                .into_response(),
            ApiError::Validation(_) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
            }
            ApiError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, Json(ErrorBody::new(message))).into_response()
            }
            ApiError::Storage | ApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(message))).into_response()
            }
        }
    }
}

/// The X-RateLimit-* header triple attached to successes and denials.
/// Reset is epoch milliseconds, as a string.
pub fn rate_limit_headers(
    limit: u32,
    remaining: u32,
    reset_at_ms: u64,
) -> [(&'static str, String); 3] {
    [
        ("x-ratelimit-limit", limit.to_string()),
        ("x-ratelimit-remaining", remaining.to_string()),
        ("x-ratelimit-reset", reset_at_ms.to_string()),
    ]
}

/// Epoch milliseconds as an ISO-8601 UTC timestamp.
fn iso8601(ms: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms as i64)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso8601_matches_wire_shape() {
        assert_eq!(iso8601(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(iso8601(1_500_000_000_123), "2017-07-14T02:40:00.123Z");
    }

    #[test]
    fn test_error_body_omits_reset_time_unless_rate_limited() {
        let body = serde_json::to_value(ErrorBody::new("Invalid email format.".into())).unwrap();
        assert_eq!(body["error"], "Invalid email format.");
        assert!(body.get("resetTime").is_none());

        let body = serde_json::to_value(ErrorBody {
            error: "Rate limit exceeded. Please try again later.".into(),
            reset_time: Some(iso8601(0)),
        })
        .unwrap();
        assert_eq!(body["resetTime"], "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_statuses_by_category() {
        let cases: [(ApiError, StatusCode); 4] = [
            (
                ApiError::Validation(ValidationError::InvalidEmail),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::RateLimited { limit: 5, reset_at_ms: 1 },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (ApiError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (ApiError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_rate_limited_response_carries_headers() {
        let response = ApiError::RateLimited {
            limit: 5,
            reset_at_ms: 42_000,
        }
        .into_response();

        let headers = response.headers();
        assert_eq!(headers.get("x-ratelimit-limit").unwrap(), "5");
        assert_eq!(headers.get("x-ratelimit-remaining").unwrap(), "0");
        assert_eq!(headers.get("x-ratelimit-reset").unwrap(), "42000");
    }
}
