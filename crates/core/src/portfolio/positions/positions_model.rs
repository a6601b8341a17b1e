use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::instruments::{instrument_kind, InstrumentKind};

/// A holding as of one snapshot date, in its own trading currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub name: String,
    pub market: String,
    pub quantity: Decimal,
    pub diluted_cost: Decimal,
    pub market_value: Decimal,
    pub current_price: Decimal,
    pub pl_percent: Decimal,
    pub pl: Decimal,
    pub today_pl: Decimal,
    pub currency: String,
    /// Share of the snapshot's total assets, in percent.
    pub portfolio_percent: Decimal,
    pub date: NaiveDate,
}

impl Position {
    pub fn kind(&self) -> InstrumentKind {
        instrument_kind(&self.symbol)
    }

    pub fn is_option(&self) -> bool {
        self.kind() == InstrumentKind::Option
    }
}
