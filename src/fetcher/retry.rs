//! Retry policy for rate-limited requests
//!
//! The fetcher retries only on HTTP 429. How long it waits before attempt `n`
//! is decided by a [`DelayStrategy`]; the wait itself goes through a
//! [`Sleeper`] so tests can observe delays without spending them.

use crate::config::FetcherConfig;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default number of retries after a 429
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default wait before each retry
pub const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_secs(15);

/// Decides the wait before a retry
pub trait DelayStrategy: Send + Sync + fmt::Debug {
    /// Delay before retry number `retry` (0-based)
    fn delay(&self, retry: u32) -> Duration;
}

/// Same delay before every retry, no jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantDelay(pub Duration);

impl DelayStrategy for ConstantDelay {
    fn delay(&self, _retry: u32) -> Duration {
        self.0
    }
}

/// Suspends the caller for a duration
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// How many times to retry a rate-limited request and how long to wait
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Arc<dyn DelayStrategy>,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: impl DelayStrategy + 'static) -> Self {
        Self {
            max_retries,
            delay: Arc::new(delay),
        }
    }

    /// Constant-delay policy using the configured retry count and delay
    pub fn from_config(config: &FetcherConfig) -> Self {
        Self::new(
            config.max_retries,
            ConstantDelay(Duration::from_secs(config.rate_limit_delay_secs)),
        )
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, ConstantDelay(DEFAULT_RATE_LIMIT_DELAY))
    }
}
