use async_trait::async_trait;
use chrono::NaiveDate;

use super::BenchmarkClose;
use crate::errors::Result;

#[async_trait]
pub trait BenchmarkRepositoryTrait: Send + Sync {
    /// Inserts or replaces closes keyed by `(date, symbol)`.
    async fn upsert_closes(&self, closes: &[BenchmarkClose]) -> Result<usize>;

    /// Closes of `symbol` with `start <= date <= end`, ascending.
    fn get_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<BenchmarkClose>>;

    fn latest_close_date(&self, symbol: &str) -> Result<Option<NaiveDate>>;
}
