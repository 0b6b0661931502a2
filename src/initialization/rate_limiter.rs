//! Rate limiter initialization.
//!
//! This module provides a minimum-delay gate for the geocoding service.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Minimum-delay gate for outbound calls.
///
/// Every call wrapped by [`RateLimiter::throttle`] starts no earlier than
/// `min_delay` after the previous wrapped call returned. The gate is held for the
/// whole call, so wrapped calls never overlap.
///
/// One instance is created per run and shared by reference with every component
/// that calls the rate-limited service.
pub struct RateLimiter {
    min_delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_call: Mutex::new(None),
        }
    }

    /// Runs `call` once the minimum delay since the previous call has elapsed.
    pub async fn throttle<F, T>(&self, call: F) -> T
    where
        F: Future<Output = T>,
    {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let ready_at = previous + self.min_delay;
            if ready_at > Instant::now() {
                log::trace!("Rate limiter waiting {:?}", ready_at - Instant::now());
                sleep_until(ready_at).await;
            }
        }
        let output = call.await;
        *last_call = Some(Instant::now());
        output
    }
}

/// Initializes the shared minimum-delay rate limiter.
pub fn init_rate_limiter(min_delay: Duration) -> Arc<RateLimiter> {
    Arc::new(RateLimiter::new(min_delay))
}
