//! Yahoo Finance market data provider.
//!
//! Used for two things:
//! - spot foreign exchange rates (e.g. `USDSGD=X`)
//! - daily closes of benchmark symbols (e.g. `SPY`)

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{fx_symbol, DailyClose};
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Decimal places kept on a spot rate.
pub const SPOT_RATE_SCALE: u32 = 3;

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    fn map_error(symbol: &str, e: yahoo::YahooError) -> MarketDataError {
        if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
            MarketDataError::SymbolNotFound(symbol.to_string())
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            }
        }
    }

    fn to_offset_datetime(date: NaiveDate) -> OffsetDateTime {
        let ts = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default();
        OffsetDateTime::from_unix_timestamp(ts).unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    fn to_daily_close(symbol: &str, quote: &yahoo::Quote) -> Result<DailyClose, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", quote.timestamp),
            })?;

        let close = Decimal::from_f64_retain(quote.close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!("Failed to convert close price {} to Decimal", quote.close),
            }
        })?;

        Ok(DailyClose {
            symbol: symbol.to_string(),
            date: timestamp.date_naive(),
            close,
            currency: "USD".to_string(),
        })
    }
}

/// Keeps the last close seen for each date, ascending, restricted to `[start, end]`.
fn dedupe_by_date(closes: Vec<DailyClose>, start: NaiveDate, end: NaiveDate) -> Vec<DailyClose> {
    let mut by_date: BTreeMap<NaiveDate, DailyClose> = BTreeMap::new();
    for close in closes {
        if close.date >= start && close.date <= end {
            by_date.insert(close.date, close);
        }
    }
    by_date.into_values().collect()
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn spot_rate(&self, from: &str, to: &str) -> Result<Decimal, MarketDataError> {
        if from == to {
            return Ok(Decimal::ONE);
        }
        let symbol = fx_symbol(from, to);
        debug!("Fetching spot rate {} from Yahoo", symbol);

        let response = self
            .connector
            .get_latest_quotes(&symbol, "1d")
            .await
            .map_err(|e| Self::map_error(&symbol, e))?;

        let quote = response.last_quote().map_err(|e| {
            warn!("No quotes returned for {}: {}", symbol, e);
            MarketDataError::SymbolNotFound(symbol.clone())
        })?;

        let rate = Decimal::from_f64_retain(quote.close)
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Failed to convert rate {} to Decimal", quote.close),
            })?
            .round_dp(SPOT_RATE_SCALE);

        if rate <= Decimal::ZERO {
            return Err(MarketDataError::ValidationFailed {
                message: format!("Non-positive rate {} for {}", rate, symbol),
            });
        }
        Ok(rate)
    }

    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyClose>, MarketDataError> {
        debug!(
            "Fetching daily closes for {} from {} to {} from Yahoo",
            symbol, start, end
        );

        // Yahoo treats the end bound as exclusive.
        let end_exclusive = end.succ_opt().unwrap_or(end);
        let response = self
            .connector
            .get_quote_history(
                symbol,
                Self::to_offset_datetime(start),
                Self::to_offset_datetime(end_exclusive),
            )
            .await
            .map_err(|e| Self::map_error(symbol, e))?;

        let quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(yahoo::YahooError::NoQuotes) => return Err(MarketDataError::NoDataForRange),
            Err(e) => {
                return Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })
            }
        };

        let closes: Vec<DailyClose> = quotes
            .iter()
            .filter_map(|q| match Self::to_daily_close(symbol, q) {
                Ok(close) => Some(close),
                Err(e) => {
                    warn!("Skipping quote due to conversion error: {:?}", e);
                    None
                }
            })
            .collect();

        let closes = dedupe_by_date(closes, start, end);
        if closes.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }
        Ok(closes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn close(day: u32, value: Decimal) -> DailyClose {
        DailyClose {
            symbol: "SPY".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            close: value,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn test_dedupe_keeps_last_close_per_day_in_range() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let closes = vec![
            close(1, dec!(100)),
            close(3, dec!(101)),
            close(2, dec!(99)),
            close(3, dec!(102)),
            close(5, dec!(103)),
        ];

        let result = dedupe_by_date(closes, start, end);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].close, dec!(99));
        assert_eq!(result[1].close, dec!(102));
    }

    #[test]
    fn test_to_daily_close_uses_utc_date() {
        let quote = yahoo::Quote {
            timestamp: 1_709_856_000, // 2024-03-08 00:00:00 UTC
            open: 1.0,
            high: 1.0,
            low: 1.0,
            volume: 0,
            close: 512.5,
            adjclose: 512.5,
        };
        let close = YahooProvider::to_daily_close("SPY", &quote).unwrap();
        assert_eq!(close.date, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
        assert_eq!(close.close, dec!(512.5));
    }

    #[test]
    fn test_offset_datetime_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let odt = YahooProvider::to_offset_datetime(date);
        assert_eq!(odt.unix_timestamp(), 1_704_067_200);
    }
}
