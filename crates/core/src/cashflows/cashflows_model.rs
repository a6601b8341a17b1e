use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single money movement reported by the broker.
///
/// `amount` is signed: deposits positive, withdrawals negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowEvent {
    pub cashflow_id: String,
    pub date: NaiveDate,
    pub currency: String,
    pub cashflow_type: String,
    pub direction: String,
    pub amount: Decimal,
    pub remark: String,
    pub is_external: bool,
}
