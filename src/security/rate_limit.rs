//! Fixed-window rate limiting for contact submissions.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::RateLimitConfig;

/// Per-client usage within the current window.
#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    /// Submissions observed in the current window. Always ≥ 1.
    count: u32,
    /// Absolute expiry of the window (milliseconds since epoch). An entry
    /// whose expiry has passed is treated as absent.
    window_reset_at: u64,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request may proceed. `remaining` is the quota left in the
    /// window after counting this request.
    Allowed { remaining: u32, reset_at_ms: u64 },
    /// The client exhausted its window. `reset_at_ms` is when the window
    /// replaces itself.
    Denied { reset_at_ms: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// A fixed-window counter keyed by client identifier.
///
/// The window is sliding-reset: expiry is evaluated strictly against the
/// stored reset timestamp, never against a rolling average, so a burst of
/// `max_requests` followed by one more request just before expiry is
/// denied even if the first request is nearly a full window old.
///
/// The table is guarded by a [`Mutex`] so check-and-increment is a single
/// critical section; two concurrent requests from one client cannot both
/// observe `count < max` and both pass. The periodic sweep takes the same
/// lock.
pub struct FixedWindowLimiter {
    entries: Mutex<HashMap<String, WindowEntry>>,
    max_requests: u32,
    window_ms: u64,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window_ms: u64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_requests,
            window_ms,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window_secs * 1000)
    }

    /// Maximum submissions per window, for response headers.
    pub fn limit(&self) -> u32 {
        self.max_requests
    }

    /// Check whether a submission from `id` is permitted now.
    ///
    /// Never fails; mutates the shared table entry for `id`.
    pub fn check(&self, id: &str) -> RateLimitDecision {
        self.check_at(id, now_ms())
    }

    /// Check against an explicit current time. `check` delegates here;
    /// tests drive the window boundaries deterministically through it.
    pub fn check_at(&self, id: &str, now_ms: u64) -> RateLimitDecision {
        let mut entries = self.entries.lock().expect("rate limit table mutex poisoned");

        let entry = entries.entry(id.to_string()).or_insert(WindowEntry {
            count: 0,
            window_reset_at: 0,
        });

        if now_ms >= entry.window_reset_at {
            // First request from this client, or its window has expired:
            // replace the entry outright, never merge.
            *entry = WindowEntry {
                count: 0,
                window_reset_at: now_ms + self.window_ms,
            };
        }

        if entry.count < self.max_requests {
            entry.count += 1;
            RateLimitDecision::Allowed {
                remaining: self.max_requests - entry.count,
                reset_at_ms: entry.window_reset_at,
            }
        } else {
            RateLimitDecision::Denied {
                reset_at_ms: entry.window_reset_at,
            }
        }
    }

    /// Remove every entry whose window has expired. Returns how many were
    /// removed. Bounds table growth from clients that stop requesting.
    pub fn sweep_expired(&self, now_ms: u64) -> usize {
        let mut entries = self.entries.lock().expect("rate limit table mutex poisoned");
        let before = entries.len();
        entries.retain(|_, entry| now_ms < entry.window_reset_at);
        before - entries.len()
    }

    /// Number of tracked clients, expired entries included.
    pub fn tracked_clients(&self) -> usize {
        self.entries.lock().expect("rate limit table mutex poisoned").len()
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW_MS: u64 = 15 * 60 * 1000;

    fn limiter() -> FixedWindowLimiter {
        FixedWindowLimiter::new(5, WINDOW_MS)
    }

    #[test]
    fn test_first_five_allowed_sixth_denied() {
        let limiter = limiter();
        let t0 = 1_000_000;

        for n in 0..5 {
            let decision = limiter.check_at("1.2.3.4", t0 + n);
            assert!(decision.is_allowed(), "request {} should be allowed", n + 1);
        }

        match limiter.check_at("1.2.3.4", t0 + 10) {
            RateLimitDecision::Denied { reset_at_ms } => {
                assert_eq!(reset_at_ms, t0 + WINDOW_MS);
            }
            other => panic!("expected denial, got {:?}", other),
        }
    }

    #[test]
    fn test_remaining_counts_down() {
        let limiter = limiter();
        let t0 = 0;

        for expected in (0..5).rev() {
            match limiter.check_at("client", t0) {
                RateLimitDecision::Allowed { remaining, .. } => {
                    assert_eq!(remaining, expected);
                }
                other => panic!("expected allowance, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_denied_just_before_expiry() {
        // Sliding-reset: the burst's age is irrelevant, only the stored
        // expiry matters.
        let limiter = limiter();
        let t0 = 0;
        for _ in 0..5 {
            limiter.check_at("client", t0);
        }
        assert!(!limiter.check_at("client", t0 + WINDOW_MS - 1).is_allowed());
    }

    #[test]
    fn test_window_reset_restores_quota() {
        let limiter = limiter();
        let t0 = 500;
        for _ in 0..6 {
            limiter.check_at("client", t0);
        }

        // At exactly the reset timestamp the entry is expired.
        match limiter.check_at("client", t0 + WINDOW_MS) {
            RateLimitDecision::Allowed { remaining, reset_at_ms } => {
                assert_eq!(remaining, 4, "counter should restart at 1");
                assert_eq!(reset_at_ms, t0 + WINDOW_MS + WINDOW_MS);
            }
            other => panic!("expected allowance after reset, got {:?}", other),
        }
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = limiter();
        for _ in 0..5 {
            limiter.check_at("a", 0);
        }
        assert!(!limiter.check_at("a", 1).is_allowed());
        assert!(limiter.check_at("b", 1).is_allowed());
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let limiter = limiter();
        limiter.check_at("old", 0);
        limiter.check_at("fresh", WINDOW_MS / 2);
        assert_eq!(limiter.tracked_clients(), 2);

        let removed = limiter.sweep_expired(WINDOW_MS);
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_clients(), 1);

        // The surviving client keeps its count.
        for _ in 0..4 {
            assert!(limiter.check_at("fresh", WINDOW_MS).is_allowed());
        }
        assert!(!limiter.check_at("fresh", WINDOW_MS).is_allowed());
    }
}
