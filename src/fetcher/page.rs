//! Single-page fetcher with bounded retry on HTTP 429

use crate::fetcher::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::fetcher::transport::Transport;
use crate::FetchError;
use std::sync::Arc;

/// Fetches one page, waiting and retrying when the server rate-limits us
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx | Return the body unchanged |
/// | HTTP 429, retries left | Wait the policy delay, retry |
/// | HTTP 429, no retries left | Fail |
/// | Any other status or network error | Fail immediately |
#[derive(Clone)]
pub struct PageFetcher {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl PageFetcher {
    /// Creates a fetcher with the default policy (3 retries, 15 s apart)
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            policy: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches `url` with the policy's retry budget
    pub async fn fetch(&self, url: &str) -> Result<Option<String>, FetchError> {
        self.fetch_with_retries(url, self.policy.max_retries).await
    }

    /// Fetches `url` allowing at most `retries_remaining` retries after 429s
    ///
    /// # Returns
    ///
    /// * `Ok(Some(html))` - The body, byte-for-byte
    /// * `Ok(None)` - The server answered without content
    /// * `Err(FetchError)` - Any failure, rate-limit exhaustion included
    pub async fn fetch_with_retries(
        &self,
        url: &str,
        mut retries_remaining: u32,
    ) -> Result<Option<String>, FetchError> {
        let mut retry = 0;

        loop {
            match self.transport.get(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_rate_limited() && retries_remaining > 0 => {
                    let delay = self.policy.delay.delay(retry);
                    tracing::warn!(
                        "Rate limited on {}, waiting {}s to continue ({} retries left)",
                        url,
                        delay.as_secs(),
                        retries_remaining
                    );
                    self.sleeper.sleep(delay).await;
                    retries_remaining -= 1;
                    retry += 1;
                }
                Err(e) => return Err(FetchError::new(url, e.message)),
            }
        }
    }
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
