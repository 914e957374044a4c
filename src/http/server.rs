//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (timeout, body limit, request ID, tracing)
//! - Bind the server to a listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ContactConfig;
use crate::http::handlers::{method_not_allowed, submit_contact};
use crate::security::FixedWindowLimiter;
use crate::storage::SubmissionStore;

/// Application state injected into handlers.
///
/// Both collaborators are constructed by the caller and shared in, so
/// tests can drive the limiter deterministically and substitute failing
/// stores.
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<FixedWindowLimiter>,
    pub store: Arc<dyn SubmissionStore>,
}

/// HTTP server for the contact service.
pub struct HttpServer {
    router: Router,
    config: ContactConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and
    /// collaborators.
    pub fn new(
        config: ContactConfig,
        limiter: Arc<FixedWindowLimiter>,
        store: Arc<dyn SubmissionStore>,
    ) -> Self {
        let state = AppState { limiter, store };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ContactConfig, state: AppState) -> Router {
        Router::new()
            .route(
                "/api/contact",
                post(submit_contact).fallback(method_not_allowed),
            )
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ContactConfig {
        &self.config
    }
}
