//! Periodic sweep of expired rate limit entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::security::rate_limit::{now_ms, FixedWindowLimiter};

/// Background task that prunes expired window entries on a fixed interval,
/// independent of request traffic.
pub struct Sweeper {
    limiter: Arc<FixedWindowLimiter>,
    interval: Duration,
}

impl Sweeper {
    pub fn new(limiter: Arc<FixedWindowLimiter>, interval: Duration) -> Self {
        Self { limiter, interval }
    }

    /// Run until the shutdown signal fires.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Rate limit sweeper starting"
        );

        let mut ticker = time::interval(self.interval);
        // The first tick completes immediately; skip it so the first sweep
        // happens one full interval after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = self.limiter.sweep_expired(now_ms());
                    if removed > 0 {
                        tracing::debug!(
                            removed,
                            tracked = self.limiter.tracked_clients(),
                            "Swept expired rate limit entries"
                        );
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Rate limit sweeper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;

    #[tokio::test]
    async fn test_sweeper_prunes_and_stops_on_shutdown() {
        let limiter = Arc::new(FixedWindowLimiter::new(5, 10));
        limiter.check_at("stale", 0);
        assert_eq!(limiter.tracked_clients(), 1);

        let shutdown = Shutdown::new();
        let sweeper = Sweeper::new(limiter.clone(), Duration::from_millis(20));
        let handle = tokio::spawn(sweeper.run(shutdown.subscribe()));

        // Entry expires at t=10ms; the first sweep lands after ~20ms.
        time::sleep(Duration::from_millis(80)).await;
        assert_eq!(limiter.tracked_clients(), 0);

        shutdown.trigger();
        time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should exit after shutdown")
            .unwrap();
    }
}
