//! Builds a day's snapshot bottom-up from its positions and cash.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::PortfolioSnapshot;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::fx::{CurrencyNormalizerTrait, RateBucket};
use crate::instruments::InstrumentKind;
use crate::portfolio::positions::Position;

/// Snapshot plus the positions it was built from, with portfolio shares filled in.
#[derive(Debug, Clone)]
pub struct BuiltSnapshot {
    pub snapshot: PortfolioSnapshot,
    pub positions: Vec<Position>,
}

/// Assembles a snapshot with `total_assets` derived from its components.
///
/// NAV and units are left at zero.
pub fn build_snapshot(
    date: NaiveDate,
    stocks_value: Decimal,
    options_value: Decimal,
    cash: Decimal,
) -> PortfolioSnapshot {
    PortfolioSnapshot {
        date,
        total_assets: stocks_value + options_value + cash,
        stocks_value,
        options_value,
        cash,
        nav: Decimal::ZERO,
        units: Decimal::ZERO,
    }
}

/// Splits positions into (equities, options).
pub fn partition_positions(positions: &[Position]) -> (Vec<&Position>, Vec<&Position>) {
    positions.iter().partition(|p| p.kind() == InstrumentKind::Equity)
}

/// `value / total * 100` rounded to 2 dp, zero when `total` is zero.
pub fn portfolio_percent(value: Decimal, total: Decimal) -> Decimal {
    value
        .checked_div(total)
        .map(|share| (share * Decimal::ONE_HUNDRED).round_dp(DISPLAY_DECIMAL_PRECISION))
        .unwrap_or(Decimal::ZERO)
}

pub struct SnapshotBuilder {
    normalizer: Arc<dyn CurrencyNormalizerTrait>,
    reporting_currency: String,
}

impl SnapshotBuilder {
    pub fn new(normalizer: Arc<dyn CurrencyNormalizerTrait>, reporting_currency: &str) -> Self {
        Self {
            normalizer,
            reporting_currency: reporting_currency.to_string(),
        }
    }

    pub fn reporting_currency(&self) -> &str {
        &self.reporting_currency
    }

    async fn to_reporting(&self, position: &Position, bucket: &RateBucket) -> Decimal {
        self.normalizer
            .convert(
                position.market_value,
                &position.currency,
                &self.reporting_currency,
                bucket,
            )
            .await
    }

    /// Builds the snapshot for `date`. `cash` must already be in the
    /// reporting currency.
    pub async fn build(
        &self,
        date: NaiveDate,
        positions: Vec<Position>,
        cash: Decimal,
        bucket: &RateBucket,
    ) -> BuiltSnapshot {
        let mut converted = Vec::with_capacity(positions.len());
        let mut stocks_value = Decimal::ZERO;
        let mut options_value = Decimal::ZERO;

        for position in &positions {
            let value = self.to_reporting(position, bucket).await;
            match position.kind() {
                InstrumentKind::Equity => stocks_value += value,
                InstrumentKind::Option => options_value += value,
            }
            converted.push(value);
        }

        let snapshot = build_snapshot(
            date,
            stocks_value.round_dp(DISPLAY_DECIMAL_PRECISION),
            options_value.round_dp(DISPLAY_DECIMAL_PRECISION),
            cash.round_dp(DISPLAY_DECIMAL_PRECISION),
        );
        debug!(
            "Built snapshot {}: stocks {} options {} cash {} total {}",
            date, snapshot.stocks_value, snapshot.options_value, snapshot.cash, snapshot.total_assets
        );

        let positions = positions
            .into_iter()
            .zip(converted)
            .map(|(mut p, value)| {
                p.date = date;
                p.portfolio_percent = portfolio_percent(value, snapshot.total_assets);
                p
            })
            .collect();

        BuiltSnapshot {
            snapshot,
            positions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::{RateSource, ResolvedRate};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    /// USD->SGD at 1.25, everything else identity.
    struct FixedNormalizer;

    #[async_trait]
    impl CurrencyNormalizerTrait for FixedNormalizer {
        async fn rate(&self, from: &str, to: &str, _bucket: &RateBucket) -> ResolvedRate {
            if from == "USD" && to == "SGD" {
                ResolvedRate {
                    rate: dec!(1.25),
                    source: RateSource::Spot,
                }
            } else {
                ResolvedRate {
                    rate: Decimal::ONE,
                    source: RateSource::Identity,
                }
            }
        }

        async fn convert(
            &self,
            amount: Decimal,
            from: &str,
            to: &str,
            bucket: &RateBucket,
        ) -> Decimal {
            let r = self.rate(from, to, bucket).await;
            (amount * r.rate).round_dp(2)
        }
    }

    fn position(symbol: &str, market_value: Decimal, currency: &str) -> Position {
        Position {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            market: "US".to_string(),
            quantity: dec!(1),
            diluted_cost: dec!(0),
            market_value,
            current_price: market_value,
            pl_percent: dec!(0),
            pl: dec!(0),
            today_pl: dec!(0),
            currency: currency.to_string(),
            portfolio_percent: dec!(0),
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_build_snapshot_sums_components() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let s = build_snapshot(date, dec!(1.10), dec!(2.20), dec!(3.30));
        assert_eq!(s.total_assets, dec!(6.60));
        assert_eq!(s.nav, Decimal::ZERO);
        assert!(s.validate_components().is_ok());
    }

    #[test]
    fn test_portfolio_percent_zero_total() {
        assert_eq!(portfolio_percent(dec!(100), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(portfolio_percent(dec!(1), dec!(3)), dec!(33.33));
    }

    #[tokio::test]
    async fn test_build_converts_each_position_in_its_own_currency() {
        let builder = SnapshotBuilder::new(Arc::new(FixedNormalizer), "SGD");
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let positions = vec![
            position("AAPL", dec!(800), "USD"),
            position("D05", dec!(500), "SGD"),
            position("AMZN260918C195000", dec!(200), "USD"),
        ];

        let built = builder
            .build(date, positions, dec!(250), &RateBucket::parse("2024-01-02-09").unwrap())
            .await;

        assert_eq!(built.snapshot.stocks_value, dec!(1500));
        assert_eq!(built.snapshot.options_value, dec!(250));
        assert_eq!(built.snapshot.cash, dec!(250));
        assert_eq!(built.snapshot.total_assets, dec!(2000));

        assert_eq!(built.positions[0].portfolio_percent, dec!(50));
        assert_eq!(built.positions[1].portfolio_percent, dec!(25));
        assert_eq!(built.positions[2].portfolio_percent, dec!(12.5));
        assert!(built.positions.iter().all(|p| p.date == date));
    }

    #[test]
    fn test_partition_positions() {
        let positions = vec![
            position("AAPL", dec!(1), "USD"),
            position("AMZN260918C195000", dec!(1), "USD"),
        ];
        let (stocks, options) = partition_positions(&positions);
        assert_eq!(stocks.len(), 1);
        assert_eq!(options[0].symbol, "AMZN260918C195000");
    }
}
