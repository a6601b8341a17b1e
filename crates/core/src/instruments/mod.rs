//! Instrument symbol rules shared by the snapshot builder, the P&L
//! aggregator and the performance pivots.
//!
//! An option symbol is `ROOT + YYMMDD + C|P + strike digits`
//! (e.g. `AMZN260918C00195000`); anything else is an equity. Every
//! partition in the crate goes through [`instrument_kind`].

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::OPTION_CONTRACT_MULTIPLIER;
use crate::errors::{Result, ValidationError};

lazy_static! {
    /// Option contract symbol, matched anywhere in the string.
    static ref OPTION_SYMBOL_REGEX: Regex =
        Regex::new(r"[A-Z]+\d{6}[CP]\d+").expect("Invalid regex pattern");

    /// Provider code `MARKET.TICKER...`.
    static ref PROVIDER_CODE_REGEX: Regex =
        Regex::new(r"^[A-Z]+\.(?P<ticker>[A-Z0-9]+)").expect("Invalid regex pattern");

    /// Leading letters of a symbol.
    static ref ROOT_REGEX: Regex = Regex::new(r"^[A-Z]+").expect("Invalid regex pattern");
}

/// Equity vs option partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentKind {
    Equity,
    Option,
}

pub fn is_option_symbol(symbol: &str) -> bool {
    OPTION_SYMBOL_REGEX.is_match(symbol)
}

pub fn instrument_kind(symbol: &str) -> InstrumentKind {
    if is_option_symbol(symbol) {
        InstrumentKind::Option
    } else {
        InstrumentKind::Equity
    }
}

/// 100 for option contracts, 1 for equities.
pub fn contract_multiplier(symbol: &str) -> Decimal {
    match instrument_kind(symbol) {
        InstrumentKind::Option => Decimal::from(OPTION_CONTRACT_MULTIPLIER),
        InstrumentKind::Equity => Decimal::ONE,
    }
}

/// Underlying ticker: the option root for options, the symbol itself otherwise.
pub fn base_ticker(symbol: &str) -> String {
    if is_option_symbol(symbol) {
        if let Some(m) = ROOT_REGEX.find(symbol) {
            return m.as_str().to_string();
        }
    }
    symbol.to_string()
}

/// Extracts `AAPL` from a provider code such as `US.AAPL`.
pub fn extract_ticker(code: &str) -> Result<String> {
    PROVIDER_CODE_REGEX
        .captures(code)
        .and_then(|caps| caps.name("ticker"))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            ValidationError::InvalidInput(format!("Unrecognised instrument code '{}'", code))
                .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_partition() {
        assert_eq!(instrument_kind("AAPL"), InstrumentKind::Equity);
        assert_eq!(instrument_kind("BRK.B"), InstrumentKind::Equity);
        assert_eq!(instrument_kind("AMZN260918C00195000"), InstrumentKind::Option);
        assert_eq!(instrument_kind("TSLA250117P250000"), InstrumentKind::Option);
        // Lower-case or missing the C/P marker is not an option.
        assert_eq!(instrument_kind("amzn260918c00195000"), InstrumentKind::Equity);
        assert_eq!(instrument_kind("AMZN260918X195000"), InstrumentKind::Equity);
    }

    #[test]
    fn test_multiplier() {
        assert_eq!(contract_multiplier("AAPL"), dec!(1));
        assert_eq!(contract_multiplier("AMZN260918C195000"), dec!(100));
    }

    #[test]
    fn test_base_ticker() {
        assert_eq!(base_ticker("AMZN260918C195000"), "AMZN");
        assert_eq!(base_ticker("AAPL"), "AAPL");
    }

    #[test]
    fn test_extract_ticker() {
        assert_eq!(extract_ticker("US.AAPL").unwrap(), "AAPL");
        assert_eq!(extract_ticker("HK.00700").unwrap(), "00700");
        assert_eq!(
            extract_ticker("US.AMZN260918C195000").unwrap(),
            "AMZN260918C195000"
        );
        assert!(extract_ticker("AAPL").is_err());
        assert!(extract_ticker("us.aapl").is_err());
    }
}
