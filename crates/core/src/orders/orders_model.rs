use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::instruments::contract_multiplier;

/// Trade direction as reported by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
    /// Any other broker side (e.g. `SELL_SHORT`); carries no realized flow.
    Other(String),
}

impl OrderSide {
    pub fn from_provider(side: &str) -> Self {
        match side.trim().to_uppercase().as_str() {
            "BUY" => OrderSide::Buy,
            "SELL" => OrderSide::Sell,
            other => OrderSide::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
            OrderSide::Other(s) => s,
        }
    }

    /// -1 for buys, +1 for sells, 0 otherwise.
    pub fn cash_sign(&self) -> Decimal {
        match self {
            OrderSide::Buy => Decimal::NEGATIVE_ONE,
            OrderSide::Sell => Decimal::ONE,
            OrderSide::Other(_) => Decimal::ZERO,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully filled order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalOrder {
    pub order_id: String,
    pub symbol: String,
    pub name: String,
    pub market: String,
    pub side: OrderSide,
    pub quantity: Decimal,
    pub price: Decimal,
    pub currency: String,
    pub executed_at: NaiveDateTime,
}

impl HistoricalOrder {
    /// Signed cash impact of the fill: sells positive, buys negative,
    /// scaled by the contract multiplier.
    pub fn realized_flow(&self) -> Decimal {
        self.quantity * self.price * contract_multiplier(&self.symbol) * self.side.cash_sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn order(symbol: &str, side: &str, qty: Decimal, price: Decimal) -> HistoricalOrder {
        HistoricalOrder {
            order_id: "1".to_string(),
            symbol: symbol.to_string(),
            name: String::new(),
            market: "US".to_string(),
            side: OrderSide::from_provider(side),
            quantity: qty,
            price,
            currency: "USD".to_string(),
            executed_at: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_realized_flow_signs() {
        assert_eq!(order("AAPL", "BUY", dec!(10), dec!(100)).realized_flow(), dec!(-1000));
        assert_eq!(order("AAPL", "sell", dec!(10), dec!(110)).realized_flow(), dec!(1100));
        assert_eq!(
            order("AAPL", "SELL_SHORT", dec!(10), dec!(110)).realized_flow(),
            dec!(0)
        );
    }

    #[test]
    fn test_option_flow_uses_contract_multiplier() {
        let o = order("AMZN260918C195000", "BUY", dec!(2), dec!(3.5));
        assert_eq!(o.realized_flow(), dec!(-700));
    }
}
