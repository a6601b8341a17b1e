use async_trait::async_trait;
use chrono::NaiveDate;

use super::RawAccountState;
use crate::errors::Result;

/// What to fetch for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Snapshot date; cashflow history is fetched from here backwards.
    pub as_of: NaiveDate,
    /// Oldest clearing date to fetch cashflows for.
    pub cashflow_start: NaiveDate,
    /// Oldest order update to fetch.
    pub orders_start: NaiveDate,
    /// Leave the gateway running after the fetch.
    pub keep_alive: bool,
}

/// Point-in-time account state from the broker.
///
/// Implementations either return a complete state or fail; partial data
/// is never returned.
#[async_trait]
pub trait AccountDataSource: Send + Sync {
    async fn fetch_account_state(&self, request: &FetchRequest) -> Result<RawAccountState>;
}
