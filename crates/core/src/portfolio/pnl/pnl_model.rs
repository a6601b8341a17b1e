use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Natural key of a net P&L row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetPnlKey {
    pub symbol: String,
    pub market: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetPnlRecord {
    pub symbol: String,
    pub market: String,
    pub currency: String,
    /// In `currency`, not converted.
    pub net_pnl: Decimal,
}

impl NetPnlRecord {
    pub fn key(&self) -> NetPnlKey {
        NetPnlKey {
            symbol: self.symbol.clone(),
            market: self.market.clone(),
            currency: self.currency.clone(),
        }
    }
}
