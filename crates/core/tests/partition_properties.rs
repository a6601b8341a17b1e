//! The option/equity partition must agree across every call site.

use navfolio_core::instruments::{base_ticker, contract_multiplier, instrument_kind, InstrumentKind};
use proptest::prelude::*;
use rust_decimal::Decimal;

proptest! {
    #[test]
    fn option_shaped_symbols_are_options(
        root in "[A-Z]{1,5}",
        expiry in "[0-9]{6}",
        right in "[CP]",
        strike in "[0-9]{1,8}",
    ) {
        let symbol = format!("{}{}{}{}", root, expiry, right, strike);
        prop_assert_eq!(instrument_kind(&symbol), InstrumentKind::Option);
        prop_assert_eq!(contract_multiplier(&symbol), Decimal::from(100));
        prop_assert_eq!(base_ticker(&symbol), root);
    }

    #[test]
    fn plain_tickers_are_equities(ticker in "[A-Z]{1,5}(\\.[A-Z])?") {
        prop_assert_eq!(instrument_kind(&ticker), InstrumentKind::Equity);
        prop_assert_eq!(contract_multiplier(&ticker), Decimal::ONE);
        prop_assert_eq!(base_ticker(&ticker), ticker);
    }

    #[test]
    fn numeric_codes_are_equities(code in "[0-9]{4,6}") {
        prop_assert_eq!(instrument_kind(&code), InstrumentKind::Equity);
    }
}
