use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use navfolio_market_data::MarketDataProvider;

use super::{FxError, SpotRateProvider};

/// Spot rates backed by a market data provider (Yahoo in production).
pub struct MarketDataSpotRates {
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketDataSpotRates {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SpotRateProvider for MarketDataSpotRates {
    async fn spot_rate(&self, from: &str, to: &str) -> Result<Decimal, FxError> {
        self.provider
            .spot_rate(from, to)
            .await
            .map_err(|e| FxError::RateUnavailable {
                from: from.to_string(),
                to: to.to_string(),
                reason: format!("{}: {}", self.provider.id(), e),
            })
    }
}
