use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{FxError, RateBucket, ResolvedRate};

/// External source of spot exchange rates.
#[async_trait]
pub trait SpotRateProvider: Send + Sync {
    /// Units of `to` per one unit of `from`.
    async fn spot_rate(&self, from: &str, to: &str) -> Result<Decimal, FxError>;
}

/// Converts monetary amounts between currencies.
///
/// Implementations never fail: a missing rate degrades to an approximate one.
#[async_trait]
pub trait CurrencyNormalizerTrait: Send + Sync {
    async fn rate(&self, from: &str, to: &str, bucket: &RateBucket) -> ResolvedRate;

    /// Converts `amount`, rounding the result to 2 dp. Equal currencies return
    /// the amount unchanged.
    async fn convert(&self, amount: Decimal, from: &str, to: &str, bucket: &RateBucket)
        -> Decimal;
}
