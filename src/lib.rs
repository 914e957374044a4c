//! Contact submission service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod security;
pub mod storage;
pub mod submission;

pub use config::schema::ContactConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
