use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

use super::{aggregate_net_pnl, NetPnlRecord, NetPnlRepositoryTrait};
use crate::errors::Result;
use crate::orders::OrderRepositoryTrait;
use crate::portfolio::positions::PositionRepositoryTrait;

/// Recomputes and stores the net P&L view.
pub struct PnlService {
    order_repository: Arc<dyn OrderRepositoryTrait>,
    position_repository: Arc<dyn PositionRepositoryTrait>,
    net_pnl_repository: Arc<dyn NetPnlRepositoryTrait>,
}

impl PnlService {
    pub fn new(
        order_repository: Arc<dyn OrderRepositoryTrait>,
        position_repository: Arc<dyn PositionRepositoryTrait>,
        net_pnl_repository: Arc<dyn NetPnlRepositoryTrait>,
    ) -> Self {
        Self {
            order_repository,
            position_repository,
            net_pnl_repository,
        }
    }

    /// Net P&L using every stored order and the positions held on `as_of`.
    pub fn net_pnl(&self, as_of: NaiveDate) -> Result<Vec<NetPnlRecord>> {
        let orders = self.order_repository.get_orders()?;
        let positions = self.position_repository.get_positions(as_of)?;
        debug!(
            "Aggregating net P&L from {} orders and {} positions as of {}",
            orders.len(),
            positions.len(),
            as_of
        );
        Ok(aggregate_net_pnl(&orders, &positions))
    }

    pub async fn refresh(&self, as_of: NaiveDate) -> Result<Vec<NetPnlRecord>> {
        let records = self.net_pnl(as_of)?;
        self.net_pnl_repository.replace_net_pnl(&records).await?;
        Ok(records)
    }
}
