//! Contact submission service.
//!
//! The HTTP backend for a portfolio site's contact form: one POST endpoint
//! that validates submissions, rate limits per client, and persists
//! accepted records.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │               CONTACT SERVICE                 │
//!                  │                                               │
//!  POST /api/contact  ┌────────┐   ┌───────────┐   ┌───────────┐  │
//!  ───────────────────▶│  http  │──▶│ security  │──▶│submission │  │
//!                  │   │handler │   │rate limit │   │ validator │  │
//!                  │   └────────┘   └─────┬─────┘   └─────┬─────┘  │
//!                  │        ▲             │               │        │
//!  JSON response   │        │       ┌─────┴─────┐   ┌─────▼─────┐  │
//!  ◀───────────────┼────────┴───────│  sweeper  │   │  storage  │  │
//!                  │                │ (periodic)│   │   seam    │  │
//!                  │                └───────────┘   └───────────┘  │
//!                  │                                               │
//!                  │   config ── lifecycle (signals, shutdown)     │
//!                  └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contact_api::config::loader::load_config;
use contact_api::config::ContactConfig;
use contact_api::http::HttpServer;
use contact_api::lifecycle::{shutdown_on_signal, Shutdown};
use contact_api::security::{FixedWindowLimiter, Sweeper};
use contact_api::storage::MemoryStore;

#[derive(Parser, Debug)]
#[command(name = "contact-api", about = "Contact form submission service")]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ContactConfig::default(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("contact_api={},tower_http=info", config.observability.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("contact-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit_max = config.rate_limit.max_requests,
        rate_limit_window_secs = config.rate_limit.window_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let limiter = Arc::new(FixedWindowLimiter::from_config(&config.rate_limit));
    let store = Arc::new(MemoryStore::new());

    // Owned background sweep of expired rate limit entries.
    let sweeper = Sweeper::new(
        limiter.clone(),
        Duration::from_secs(config.rate_limit.sweep_interval_secs),
    );
    tokio::spawn(sweeper.run(shutdown.subscribe()));

    // The signal task takes ownership of the coordinator; everything else
    // holds receivers subscribed before the handoff.
    let server_rx = shutdown.subscribe();
    tokio::spawn(shutdown_on_signal(shutdown));

    let server = HttpServer::new(config, limiter, store);
    server.run(listener, server_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
