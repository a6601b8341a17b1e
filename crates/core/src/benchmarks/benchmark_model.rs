use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use navfolio_market_data::DailyClose;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkClose {
    pub date: NaiveDate,
    pub symbol: String,
    pub close: Decimal,
    pub currency: String,
}

impl From<DailyClose> for BenchmarkClose {
    fn from(close: DailyClose) -> Self {
        Self {
            date: close.date,
            symbol: close.symbol,
            close: close.close,
            currency: close.currency,
        }
    }
}
