//! HTTP surface for the contact service.
//!
//! # Responsibilities
//! - Build the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Orchestrate the submission pipeline per request
//! - Map pipeline outcomes to the wire contract
//!
//! # Data Flow
//! ```text
//! POST /api/contact
//!     → request.rs (client identifier, user agent)
//!     → handlers.rs (parse → rate check → validate → persist)
//!     → response.rs (success body / error body + rate limit headers)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
