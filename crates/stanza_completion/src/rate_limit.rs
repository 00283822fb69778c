//! Request-rate limiting for completion backends.
//!
//! Uses governor's GCRA limiter so concurrent attempts share one quota.

use crate::{CompletionClient, CompletionRequest};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use stanza_error::CompletionError;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, instrument};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Wraps a client so calls wait for a requests-per-minute slot.
///
/// Clones share the same quota.
#[derive(Clone)]
pub struct RateLimitedClient<C> {
    inner: C,
    limiter: Arc<DirectRateLimiter>,
    requests_per_minute: NonZeroU32,
}

impl<C: CompletionClient> RateLimitedClient<C> {
    /// Limits `inner` to `requests_per_minute` calls.
    pub fn new(inner: C, requests_per_minute: NonZeroU32) -> Self {
        let limiter = Arc::new(RateLimiter::direct(Quota::per_minute(requests_per_minute)));
        Self {
            inner,
            limiter,
            requests_per_minute,
        }
    }

    /// Configured quota.
    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute.get()
    }

    /// The wrapped client.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C> std::fmt::Debug for RateLimitedClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitedClient")
            .field("requests_per_minute", &self.requests_per_minute)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for RateLimitedClient<C> {
    #[instrument(skip(self, request), fields(rpm = self.requests_per_minute.get()))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.limiter.until_ready().await;
        debug!("Rate limit slot acquired");
        self.inner.complete(request).await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}
