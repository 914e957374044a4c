//! Request metadata extraction.
//!
//! # Responsibilities
//! - Derive the rate limit partition key from proxy headers
//! - Extract the caller's user agent and the request ID
//!
//! # Design Decisions
//! - The identifier prefers the forwarded-for chain's first entry, the
//!   address closest to the original client
//! - All of these headers are caller-controlled in untrusted deployments;
//!   the value is advisory and never treated as authenticated

use axum::http::{header, HeaderMap};

/// Placeholder identifier when no addressing header is present.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derive the client identifier used to partition the rate limit table.
///
/// Precedence: first `x-forwarded-for` entry, then `x-real-ip`, then
/// `cf-connecting-ip`, then [`UNKNOWN_CLIENT`].
pub fn client_identifier(headers: &HeaderMap) -> String {
    if let Some(forwarded_for) = header_str(headers, "x-forwarded-for") {
        if let Some(first) = forwarded_for.split(',').next() {
            return first.trim().to_string();
        }
    }

    if let Some(real_ip) = header_str(headers, "x-real-ip") {
        return real_ip.to_string();
    }

    if let Some(cf_ip) = header_str(headers, "cf-connecting-ip") {
        return cf_ip.to_string();
    }

    UNKNOWN_CLIENT.to_string()
}

/// The caller's user agent, or "Unknown".
pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("Unknown")
        .to_string()
}

/// The request ID stamped by the request-id layer, for log correlation.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}
