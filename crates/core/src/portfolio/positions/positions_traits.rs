use async_trait::async_trait;
use chrono::NaiveDate;

use super::Position;
use crate::errors::Result;

/// Repository trait for position rows.
#[async_trait]
pub trait PositionRepositoryTrait: Send + Sync {
    /// Replaces every row of `date` with `positions` in one transaction.
    async fn replace_positions_for_date(
        &self,
        date: NaiveDate,
        positions: &[Position],
    ) -> Result<usize>;

    /// Rows for `date`, ordered by market value descending.
    fn get_positions(&self, date: NaiveDate) -> Result<Vec<Position>>;
}
