use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `(nav, units)` carried from one day to the next.
///
/// The default (zero, zero) is the state of an empty store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavState {
    pub nav: Decimal,
    pub units: Decimal,
}

impl NavState {
    pub fn is_initial(&self) -> bool {
        self.units.is_zero()
    }

    /// Value the state represents (`nav * units`).
    pub fn value(&self) -> Decimal {
        self.nav * self.units
    }
}

/// Everything that went into one day's NAV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavComputation {
    pub previous: NavState,
    pub net_external_cashflow: Decimal,
    pub total_assets: Decimal,
    pub next: NavState,
}
