//! Raw rows as the broker gateway reports them, before normalisation.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::cashflows::CashflowEvent;
use crate::orders::HistoricalOrder;
use crate::portfolio::positions::Position;

/// Accepts `"123"` or `123` for identifier fields.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Unsigned(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Unsigned(n) => n.to_string(),
    })
}

/// Account summary, queried in the reporting currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAccountSummary {
    pub total_assets: Decimal,
    #[serde(default)]
    pub securities_assets: Decimal,
    #[serde(default)]
    pub fund_assets: Decimal,
    #[serde(default)]
    pub bond_assets: Decimal,
    pub cash: Decimal,
    /// Currency the figures above are expressed in.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub us_cash: Option<Decimal>,
    #[serde(default)]
    pub sg_cash: Option<Decimal>,
    #[serde(default)]
    pub usd_assets: Option<Decimal>,
    #[serde(default)]
    pub sgd_assets: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    pub code: String,
    #[serde(default)]
    pub stock_name: String,
    pub position_market: String,
    pub qty: Decimal,
    #[serde(default)]
    pub diluted_cost: Decimal,
    pub market_val: Decimal,
    #[serde(default)]
    pub nominal_price: Decimal,
    #[serde(default)]
    pub pl_ratio: Decimal,
    #[serde(default)]
    pub pl_val: Decimal,
    #[serde(default)]
    pub today_pl_val: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCashflow {
    #[serde(deserialize_with = "string_or_number")]
    pub cashflow_id: String,
    pub clearing_date: String,
    pub currency: String,
    pub cashflow_type: String,
    #[serde(default)]
    pub cashflow_direction: String,
    pub cashflow_amount: Decimal,
    #[serde(default)]
    pub cashflow_remark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrder {
    pub code: String,
    #[serde(default)]
    pub stock_name: String,
    #[serde(default)]
    pub order_market: String,
    pub trd_side: String,
    #[serde(deserialize_with = "string_or_number")]
    pub order_id: String,
    pub qty: Decimal,
    pub price: Decimal,
    pub currency: String,
    pub order_status: String,
    pub updated_time: String,
}

/// Everything fetched from the gateway for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAccountState {
    pub summary: RawAccountSummary,
    pub positions: Vec<RawPosition>,
    pub cashflows: Vec<RawCashflow>,
    pub orders: Vec<RawOrder>,
}

/// Account summary after rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub total_assets: Decimal,
    pub securities_assets: Decimal,
    pub bond_assets: Decimal,
    /// `fund_assets + cash`.
    pub cash: Decimal,
    pub currency: String,
}

/// Typed records ready for the snapshot builder and the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAccountState {
    pub summary: AccountSummary,
    pub positions: Vec<Position>,
    pub cashflows: Vec<CashflowEvent>,
    pub orders: Vec<HistoricalOrder>,
}
