//! Read-side performance models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Day-over-day change of the headline figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDeltas {
    pub date: NaiveDate,
    pub previous_date: NaiveDate,
    pub total: Decimal,
    pub stocks: Decimal,
    pub options: Decimal,
    pub cash: Decimal,
    pub nav: Decimal,
}

/// Percentage split of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub date: NaiveDate,
    pub total: Decimal,
    pub stocks_percent: Decimal,
    pub options_percent: Decimal,
    pub cash_percent: Decimal,
}

/// Net P&L of one underlying, split into its equity and option legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerPnl {
    pub ticker: String,
    pub stock: Decimal,
    pub option: Decimal,
    pub total: Decimal,
}

/// Headline view of the latest snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioOverview {
    pub snapshot: crate::portfolio::snapshot::PortfolioSnapshot,
    pub deltas: Option<DailyDeltas>,
    pub allocation: Allocation,
}
