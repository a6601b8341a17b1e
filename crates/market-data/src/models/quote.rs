use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily close for a symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    pub symbol: String,
    pub date: NaiveDate,
    pub close: Decimal,
    pub currency: String,
}

/// Yahoo-style FX ticker for a currency pair.
///
/// Yahoo quotes USD crosses as `XXX=X` (units of XXX per USD inverted), so a
/// conversion *into* USD uses the short form and everything else the full
/// `FROMTO=X` pair.
pub fn fx_symbol(from: &str, to: &str) -> String {
    if to == "USD" {
        format!("{}=X", from)
    } else {
        format!("{}{}=X", from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_symbol_into_usd_uses_short_form() {
        assert_eq!(fx_symbol("SGD", "USD"), "SGD=X");
    }

    #[test]
    fn test_fx_symbol_cross_pair() {
        assert_eq!(fx_symbol("USD", "SGD"), "USDSGD=X");
        assert_eq!(fx_symbol("HKD", "SGD"), "HKDSGD=X");
    }
}
