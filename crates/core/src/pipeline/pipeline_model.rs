use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::portfolio::snapshot::PortfolioSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Snapshot date.
    pub date: NaiveDate,
    /// Oldest clearing date for the cashflow history fetch.
    pub backfill_start: NaiveDate,
    /// Re-run even if the date is already stored.
    pub force: bool,
    /// Leave the gateway running afterwards.
    pub keep_alive: bool,
    /// Wall-clock time of the run; its hour is the FX rate bucket.
    pub run_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub snapshot: PortfolioSnapshot,
    pub net_external_cashflow: Decimal,
    pub positions_written: usize,
    pub orders_written: usize,
    pub cashflows_written: usize,
    pub net_pnl_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum RunOutcome {
    /// The date was already stored and the run was not forced.
    Skipped { date: NaiveDate },
    Completed(RunSummary),
}
