//! Repository traits for portfolio snapshots.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::PortfolioSnapshot;
use crate::errors::Result;
use crate::portfolio::nav::NavState;

/// Repository trait for daily portfolio snapshots.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Whether a snapshot row exists for `date`. A store that has not been
    /// initialised yet reports `false`.
    fn exists(&self, date: NaiveDate) -> Result<bool>;

    /// NAV state of the most recent snapshot strictly before `date`, or
    /// `NavState::default()` (zero nav, zero units) when there is none.
    fn latest_prior(&self, date: NaiveDate) -> Result<NavState>;

    /// Insert or replace the row keyed by the snapshot's date.
    async fn upsert_snapshot(&self, snapshot: &PortfolioSnapshot) -> Result<()>;

    fn get_snapshot(&self, date: NaiveDate) -> Result<Option<PortfolioSnapshot>>;

    /// Most recent snapshot strictly before `date`.
    fn get_snapshot_before(&self, date: NaiveDate) -> Result<Option<PortfolioSnapshot>>;

    fn get_latest_snapshot(&self) -> Result<Option<PortfolioSnapshot>>;

    /// Snapshots within the optional inclusive bounds, ordered by date ascending.
    fn get_snapshots(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PortfolioSnapshot>>;
}
