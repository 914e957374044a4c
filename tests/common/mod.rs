//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;
use uuid::Uuid;

use contact_api::config::ContactConfig;
use contact_api::http::HttpServer;
use contact_api::lifecycle::Shutdown;
use contact_api::security::FixedWindowLimiter;
use contact_api::storage::{StoreError, SubmissionStore};
use contact_api::submission::SubmissionRecord;

/// Spawn the real server on an ephemeral port with the given store.
///
/// The listener is bound before the task is spawned, so callers can issue
/// requests immediately. The returned coordinator stops the server.
pub async fn spawn_server(store: Arc<dyn SubmissionStore>) -> (SocketAddr, Shutdown) {
    let config = ContactConfig::default();
    let limiter = Arc::new(FixedWindowLimiter::from_config(&config.rate_limit));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_rx = shutdown.subscribe();
    let server = HttpServer::new(config, limiter, store);

    tokio::spawn(async move {
        let _ = server.run(listener, server_rx).await;
    });

    (addr, shutdown)
}

pub fn contact_url(addr: SocketAddr) -> String {
    format!("http://{}/api/contact", addr)
}

/// A payload that passes every validation rule.
pub fn valid_payload() -> serde_json::Value {
    serde_json::json!({
        "name": "Ada",
        "email": "ada@example.com",
        "message": "Hello there, this works."
    })
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// A store whose writes always fail, for exercising the persistence
/// failure path.
pub struct FailingStore;

#[async_trait]
impl SubmissionStore for FailingStore {
    async fn save(&self, _record: SubmissionRecord) -> Result<Uuid, StoreError> {
        Err(StoreError::Unavailable("injected failure".into()))
    }
}
