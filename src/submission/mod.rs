//! Contact submission data model.
//!
//! # Data Flow
//! ```text
//! JSON body
//!     → ContactRequest (untrusted)
//!     → validate.rs (presence, email shape, sanitize, bounds)
//!     → SanitizedSubmission (trusted)
//!     → SubmissionRecord (+ client identifier, user agent)
//!     → storage
//! ```

pub mod validate;

use serde::Deserialize;

pub use validate::{validate, ValidationError};

/// An incoming contact form payload, exactly as the caller sent it.
///
/// Fields default to empty rather than failing deserialization when
/// absent, so a missing field surfaces as a validation rejection instead
/// of a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// A submission after trimming, truncation, and normalization.
///
/// Every field satisfies the documented length bounds; the email is
/// lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedSubmission {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// What gets handed to the persistence backend: the sanitized fields plus
/// caller metadata.
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    /// Rate-limit partition key derived from proxy headers; spoofable,
    /// stored for operator triage only.
    pub client_id: String,
    pub user_agent: String,
}

impl SubmissionRecord {
    pub fn new(submission: SanitizedSubmission, client_id: String, user_agent: String) -> Self {
        Self {
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            client_id,
            user_agent,
        }
    }
}
