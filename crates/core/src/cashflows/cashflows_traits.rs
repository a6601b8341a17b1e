use async_trait::async_trait;
use chrono::NaiveDate;

use super::CashflowEvent;
use crate::errors::Result;

/// Repository trait for cashflow events.
#[async_trait]
pub trait CashflowRepositoryTrait: Send + Sync {
    /// Inserts or replaces events keyed by `cashflow_id`. Returns rows written.
    async fn upsert_cashflows(&self, events: &[CashflowEvent]) -> Result<usize>;

    /// External events whose clearing date is exactly `date`.
    fn get_external_cashflows(&self, date: NaiveDate) -> Result<Vec<CashflowEvent>>;

    /// All events with `start <= date <= end`, ordered by date.
    fn get_cashflows_in_range(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<CashflowEvent>>;
}
