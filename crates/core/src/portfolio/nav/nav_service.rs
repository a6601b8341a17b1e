use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::{compute_nav, net_external_cashflow, NavComputation};
use crate::cashflows::CashflowRepositoryTrait;
use crate::errors::Result;
use crate::fx::{CurrencyNormalizerTrait, RateBucket};
use crate::portfolio::snapshot::SnapshotRepositoryTrait;

/// Reads prior state and the day's cashflows from the store and runs the engine.
pub struct NavService {
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    cashflow_repository: Arc<dyn CashflowRepositoryTrait>,
    normalizer: Arc<dyn CurrencyNormalizerTrait>,
    reporting_currency: String,
}

impl NavService {
    pub fn new(
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
        cashflow_repository: Arc<dyn CashflowRepositoryTrait>,
        normalizer: Arc<dyn CurrencyNormalizerTrait>,
        reporting_currency: &str,
    ) -> Self {
        Self {
            snapshot_repository,
            cashflow_repository,
            normalizer,
            reporting_currency: reporting_currency.to_string(),
        }
    }

    pub async fn net_cashflow_for(&self, date: NaiveDate, bucket: &RateBucket) -> Result<Decimal> {
        let events = self.cashflow_repository.get_external_cashflows(date)?;
        Ok(net_external_cashflow(
            &events,
            date,
            &self.reporting_currency,
            self.normalizer.as_ref(),
            bucket,
        )
        .await)
    }

    /// NAV and units for `date` given that day's total assets.
    pub async fn compute_for(
        &self,
        date: NaiveDate,
        total_assets: Decimal,
        bucket: &RateBucket,
    ) -> Result<NavComputation> {
        let previous = self.snapshot_repository.latest_prior(date)?;
        let net_cashflow = self.net_cashflow_for(date, bucket).await?;
        let next = compute_nav(total_assets, net_cashflow, previous)?;

        info!(
            "NAV for {}: {:.4} (net external cashflow {:.2}, units {:.4})",
            date, next.nav, net_cashflow, next.units
        );

        Ok(NavComputation {
            previous,
            net_external_cashflow: net_cashflow,
            total_assets,
            next,
        })
    }
}
