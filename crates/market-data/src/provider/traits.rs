//! Market data provider trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::DailyClose;

/// Trait for market data providers.
///
/// Implementations are shared behind an `Arc` by the currency normalizer
/// and the benchmark service, so they must be `Send + Sync`.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "YAHOO".
    fn id(&self) -> &'static str;

    /// Latest spot rate: units of `to` per one unit of `from`.
    async fn spot_rate(&self, from: &str, to: &str) -> Result<Decimal, MarketDataError>;

    /// Daily closes for `symbol` between `start` and `end` inclusive,
    /// ordered by date ascending.
    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyClose>, MarketDataError>;
}
