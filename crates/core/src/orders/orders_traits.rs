use async_trait::async_trait;

use super::HistoricalOrder;
use crate::errors::Result;

/// Repository trait for filled orders.
#[async_trait]
pub trait OrderRepositoryTrait: Send + Sync {
    /// Inserts or replaces orders keyed by `order_id`. Returns rows written.
    async fn upsert_orders(&self, orders: &[HistoricalOrder]) -> Result<usize>;

    fn get_orders(&self) -> Result<Vec<HistoricalOrder>>;
}
