//! Performance queries over the stored series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::{allocation, daily_deltas, pnl_by_ticker, twr, PortfolioOverview, TickerPnl};
use crate::errors::Result;
use crate::portfolio::pnl::NetPnlRepositoryTrait;
use crate::portfolio::snapshot::SnapshotRepositoryTrait;

pub struct PerformanceService {
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    net_pnl_repository: Arc<dyn NetPnlRepositoryTrait>,
}

impl PerformanceService {
    pub fn new(
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
        net_pnl_repository: Arc<dyn NetPnlRepositoryTrait>,
    ) -> Self {
        Self {
            snapshot_repository,
            net_pnl_repository,
        }
    }

    pub fn twr(&self, start: NaiveDate, end: NaiveDate) -> Result<Option<Decimal>> {
        let series = self
            .snapshot_repository
            .get_snapshots(Some(start), Some(end))?;
        Ok(twr(&series, start, end))
    }

    /// Latest snapshot with its deltas against the previous stored day.
    pub fn overview(&self) -> Result<Option<PortfolioOverview>> {
        let Some(latest) = self.snapshot_repository.get_latest_snapshot()? else {
            return Ok(None);
        };
        let deltas = self
            .snapshot_repository
            .get_snapshot_before(latest.date)?
            .map(|prev| daily_deltas(&latest, &prev));
        let allocation = allocation(&latest);
        Ok(Some(PortfolioOverview {
            snapshot: latest,
            deltas,
            allocation,
        }))
    }

    pub fn pnl_by_ticker(&self, market: &str) -> Result<Vec<TickerPnl>> {
        let records = self.net_pnl_repository.get_net_pnl(Some(market))?;
        Ok(pnl_by_ticker(&records, market))
    }
}
