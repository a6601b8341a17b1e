use chrono::NaiveDate;
use log::{info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use navfolio_market_data::{MarketDataError, MarketDataProvider};

use super::{BenchmarkClose, BenchmarkRepositoryTrait};
use crate::errors::Result;

/// Simple return between the first and last close of an ascending series.
pub fn benchmark_return(closes: &[BenchmarkClose]) -> Option<Decimal> {
    let first = closes.first()?.close;
    let last = closes.last()?.close;
    (last - first).checked_div(first)
}

pub struct BenchmarkService {
    provider: Arc<dyn MarketDataProvider>,
    repository: Arc<dyn BenchmarkRepositoryTrait>,
}

impl BenchmarkService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        repository: Arc<dyn BenchmarkRepositoryTrait>,
    ) -> Self {
        Self {
            provider,
            repository,
        }
    }

    /// Fetches closes after the last stored one (or from `start`) through
    /// `end` and stores them. Returns the number of rows written.
    pub async fn sync(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<usize> {
        let from = match self.repository.latest_close_date(symbol)? {
            Some(latest) if latest >= start => latest.succ_opt().unwrap_or(latest),
            _ => start,
        };
        if from > end {
            return Ok(0);
        }

        let closes = match self.provider.daily_closes(symbol, from, end).await {
            Ok(closes) => closes,
            Err(MarketDataError::NoDataForRange) => {
                warn!("No {} closes between {} and {}", symbol, from, end);
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let rows: Vec<BenchmarkClose> = closes.into_iter().map(BenchmarkClose::from).collect();
        let written = self.repository.upsert_closes(&rows).await?;
        info!("Stored {} {} closes from {}", written, symbol, from);
        Ok(written)
    }

    /// Return of `symbol` over `[start, end]` from stored closes.
    pub fn benchmark_return(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Decimal>> {
        let closes = self.repository.get_closes(symbol, start, end)?;
        Ok(benchmark_return(&closes))
    }
}
