//! Currency normalizer: hourly-cached spot rates with a static fallback.

use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::{
    fallback_rate, CurrencyNormalizerTrait, RateBucket, RateCache, RateSource, ResolvedRate,
    SpotRateProvider,
};
use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Converts amounts between currencies.
///
/// At most one spot lookup is made per currency pair and bucket; whatever
/// was resolved (spot or fallback) is reused until it is evicted.
pub struct CurrencyNormalizer {
    provider: Arc<dyn SpotRateProvider>,
    cache: RateCache,
}

impl CurrencyNormalizer {
    pub fn new(provider: Arc<dyn SpotRateProvider>) -> Self {
        Self::with_cache(provider, RateCache::default())
    }

    pub fn with_cache(provider: Arc<dyn SpotRateProvider>, cache: RateCache) -> Self {
        Self { provider, cache }
    }

    fn normalize_code(code: &str) -> String {
        code.trim().to_uppercase()
    }

    async fn resolve(&self, from: &str, to: &str) -> ResolvedRate {
        match self.provider.spot_rate(from, to).await {
            Ok(rate) if rate > Decimal::ZERO => ResolvedRate {
                rate,
                source: RateSource::Spot,
            },
            Ok(rate) => {
                let fallback = fallback_rate(from, to);
                warn!(
                    "Spot rate {}->{} was {}, using fallback {}",
                    from, to, rate, fallback
                );
                ResolvedRate {
                    rate: fallback,
                    source: RateSource::Fallback,
                }
            }
            Err(e) => {
                let fallback = fallback_rate(from, to);
                warn!("{}; using fallback rate {}", e, fallback);
                ResolvedRate {
                    rate: fallback,
                    source: RateSource::Fallback,
                }
            }
        }
    }
}

#[async_trait]
impl CurrencyNormalizerTrait for CurrencyNormalizer {
    async fn rate(&self, from: &str, to: &str, bucket: &RateBucket) -> ResolvedRate {
        let from = Self::normalize_code(from);
        let to = Self::normalize_code(to);
        if from == to {
            return ResolvedRate {
                rate: Decimal::ONE,
                source: RateSource::Identity,
            };
        }

        if let Some(hit) = self.cache.get(&from, &to, bucket) {
            return hit;
        }

        let resolved = self.resolve(&from, &to).await;
        debug!(
            "Resolved {}->{} for {}: {} ({:?})",
            from, to, bucket, resolved.rate, resolved.source
        );
        self.cache.insert(&from, &to, bucket, resolved.clone());
        resolved
    }

    async fn convert(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        bucket: &RateBucket,
    ) -> Decimal {
        let resolved = self.rate(from, to, bucket).await;
        if resolved.source == RateSource::Identity {
            return amount;
        }
        (amount * resolved.rate).round_dp(DISPLAY_DECIMAL_PRECISION)
    }
}
