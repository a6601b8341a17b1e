use moka::sync::Cache;

use super::{RateBucket, ResolvedRate};

/// Default number of (pair, bucket) entries kept.
pub const DEFAULT_RATE_CACHE_CAPACITY: u64 = 64;

type RateKey = (String, String, RateBucket);

/// Bounded cache of resolved rates keyed by `(from, to, bucket)`.
#[derive(Clone)]
pub struct RateCache {
    inner: Cache<RateKey, ResolvedRate>,
}

impl RateCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::builder().max_capacity(capacity.max(16)).build(),
        }
    }

    pub fn get(&self, from: &str, to: &str, bucket: &RateBucket) -> Option<ResolvedRate> {
        self.inner
            .get(&(from.to_string(), to.to_string(), bucket.clone()))
    }

    pub fn insert(&self, from: &str, to: &str, bucket: &RateBucket, rate: ResolvedRate) {
        self.inner
            .insert((from.to_string(), to.to_string(), bucket.clone()), rate);
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_CACHE_CAPACITY)
    }
}
