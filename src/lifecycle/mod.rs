//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build limiter/store → Spawn sweeper → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → server drains, sweeper exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - One broadcast channel fans the shutdown signal out to every
//!   long-running task
//! - Background tasks are owned: started at process init, stopped through
//!   the same coordinator

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_on_signal;
