use async_trait::async_trait;

use super::NetPnlRecord;
use crate::errors::Result;

/// Repository trait for the persisted net P&L view.
#[async_trait]
pub trait NetPnlRepositoryTrait: Send + Sync {
    /// Replaces the whole view with `records`, keyed by
    /// `(symbol, market, currency)`. Keys absent from `records` are removed.
    async fn replace_net_pnl(&self, records: &[NetPnlRecord]) -> Result<usize>;

    /// Rows, optionally restricted to one market.
    fn get_net_pnl(&self, market: Option<&str>) -> Result<Vec<NetPnlRecord>>;
}
