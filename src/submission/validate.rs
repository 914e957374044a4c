//! Submission validation and sanitization.

use thiserror::Error;

use crate::submission::{ContactRequest, SanitizedSubmission};

/// Hard cap applied to every field before the per-field bounds. Input
/// beyond this is truncated, not rejected.
pub const MAX_FIELD_CHARS: usize = 10_000;

const NAME_MAX: usize = 255;
const EMAIL_MIN: usize = 5;
const EMAIL_MAX: usize = 255;
const MESSAGE_MIN: usize = 10;
const SUBJECT_MAX: usize = 500;

/// Why a submission was rejected. Display strings are surfaced verbatim to
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of name, email, message is empty after trimming.
    #[error("Missing required fields: name, email, and message are required.")]
    MissingFields,

    /// Email does not look like local@domain.tld.
    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("Name must be between 1 and 255 characters.")]
    NameLength,

    #[error("Email must be between 5 and 255 characters.")]
    EmailLength,

    #[error("Message must be between 10 and 10,000 characters.")]
    MessageLength,

    #[error("Subject must be less than 500 characters.")]
    SubjectLength,
}

/// Transform an untrusted request into a sanitized submission, or reject
/// it with the first rule it violates.
///
/// Rules run in a fixed order and short-circuit: presence, email shape,
/// then length bounds on the sanitized fields (name, email, message,
/// subject).
pub fn validate(request: &ContactRequest) -> Result<SanitizedSubmission, ValidationError> {
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.message.trim().is_empty()
    {
        return Err(ValidationError::MissingFields);
    }

    if !is_valid_email(&request.email) {
        return Err(ValidationError::InvalidEmail);
    }

    let submission = SanitizedSubmission {
        name: sanitize(&request.name),
        email: sanitize(&request.email).to_lowercase(),
        subject: request.subject.as_deref().map(sanitize),
        message: sanitize(&request.message),
    };

    let name_len = submission.name.chars().count();
    if name_len < 1 || name_len > NAME_MAX {
        return Err(ValidationError::NameLength);
    }

    let email_len = submission.email.chars().count();
    if email_len < EMAIL_MIN || email_len > EMAIL_MAX {
        return Err(ValidationError::EmailLength);
    }

    let message_len = submission.message.chars().count();
    if message_len < MESSAGE_MIN || message_len > MAX_FIELD_CHARS {
        return Err(ValidationError::MessageLength);
    }

    if let Some(subject) = &submission.subject {
        if subject.chars().count() > SUBJECT_MAX {
            return Err(ValidationError::SubjectLength);
        }
    }

    Ok(submission)
}

/// Trim surrounding whitespace and cap the field at [`MAX_FIELD_CHARS`]
/// characters. The tail is re-trimmed after truncation so the result is a
/// fixed point: sanitizing it again changes nothing.
fn sanitize(input: &str) -> String {
    let trimmed = input.trim();
    let mut out: String = trimmed.chars().take(MAX_FIELD_CHARS).collect();
    out.truncate(out.trim_end().len());
    out
}

/// Shape check equivalent to `local@domain.tld`: a nonempty local part,
/// exactly one `@`, a domain with an interior dot, and no whitespace
/// anywhere.
fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .match_indices('.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}
