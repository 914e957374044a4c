//! Submission endpoint orchestration.
//!
//! Each request moves through a strictly sequential pipeline: parse,
//! rate check, validate, persist, respond. A failure at any step answers
//! immediately; there is no retry and no partial-completion state. Rate
//! limiting runs before validation and persistence, so rejected and failed
//! attempts still consume quota.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::http::request::{client_identifier, request_id, user_agent};
use crate::http::response::{rate_limit_headers, ApiError, SubmissionAccepted};
use crate::http::server::AppState;
use crate::security::rate_limit::RateLimitDecision;
use crate::submission::{validate, ContactRequest, SubmissionRecord};

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request_id = request_id(&headers);
    let client_id = client_identifier(&headers);

    let request: ContactRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(error) => {
            tracing::error!(
                request_id = %request_id,
                client = %client_id,
                error = %error,
                "Malformed submission body"
            );
            return Err(ApiError::Internal);
        }
    };

    let (remaining, reset_at_ms) = match state.limiter.check(&client_id) {
        RateLimitDecision::Allowed { remaining, reset_at_ms } => (remaining, reset_at_ms),
        RateLimitDecision::Denied { reset_at_ms } => {
            tracing::debug!(
                request_id = %request_id,
                client = %client_id,
                reset_at_ms,
                "Submission rate limited"
            );
            return Err(ApiError::RateLimited {
                limit: state.limiter.limit(),
                reset_at_ms,
            });
        }
    };

    let submission = match validate(&request) {
        Ok(submission) => submission,
        Err(reason) => {
            tracing::debug!(
                request_id = %request_id,
                client = %client_id,
                reason = %reason,
                "Submission rejected"
            );
            return Err(ApiError::Validation(reason));
        }
    };

    let record = SubmissionRecord::new(submission, client_id.clone(), user_agent(&headers));
    let id = match state.store.save(record).await {
        Ok(id) => id,
        Err(error) => {
            // Quota already charged above stays charged; a failed write
            // must not invite a retry storm.
            tracing::error!(
                request_id = %request_id,
                client = %client_id,
                error = %error,
                "Failed to persist submission"
            );
            return Err(ApiError::Storage);
        }
    };

    tracing::info!(
        request_id = %request_id,
        client = %client_id,
        submission_id = %id,
        remaining,
        "Contact submission stored"
    );

    Ok((
        StatusCode::OK,
        rate_limit_headers(state.limiter.limit(), remaining, reset_at_ms),
        Json(SubmissionAccepted::new(id)),
    ))
}

/// Answers any non-POST method on the submission path.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
