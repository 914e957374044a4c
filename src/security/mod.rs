//! Abuse prevention for the submission endpoint.
//!
//! # Data Flow
//! ```text
//! handler ──check(client id)──▶ rate_limit.rs (fixed-window table)
//!                                    ▲
//! sweep.rs (periodic task) ──────────┘ removes expired entries
//! ```
//!
//! # Design Decisions
//! - One table entry per client identifier, replaced (not merged) when its
//!   window expires
//! - The identifier comes from spoofable proxy headers, so the limiter is a
//!   best-effort deterrent, not a security boundary

pub mod rate_limit;
pub mod sweep;

pub use rate_limit::{FixedWindowLimiter, RateLimitDecision};
pub use sweep::Sweeper;
