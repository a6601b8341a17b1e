//! Portfolio snapshot domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::NAV_TOLERANCE;
use crate::errors::{NavError, Result, ValidationError};
use crate::portfolio::nav::NavState;

/// The portfolio's valuation as of one calendar day, in the reporting currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub date: NaiveDate,
    pub total_assets: Decimal,
    pub stocks_value: Decimal,
    pub options_value: Decimal,
    pub cash: Decimal,
    /// Per-unit value. Zero until the NAV engine has run.
    pub nav: Decimal,
    /// Units outstanding. Zero until the NAV engine has run.
    pub units: Decimal,
}

impl PortfolioSnapshot {
    pub fn nav_state(&self) -> NavState {
        NavState {
            nav: self.nav,
            units: self.units,
        }
    }

    pub fn with_nav(mut self, state: NavState) -> Self {
        self.nav = state.nav;
        self.units = state.units;
        self
    }

    /// `total_assets == stocks + options + cash` within tolerance.
    pub fn validate_components(&self) -> Result<()> {
        let sum = self.stocks_value + self.options_value + self.cash;
        if (self.total_assets - sum).abs() >= NAV_TOLERANCE {
            return Err(ValidationError::InvalidInput(format!(
                "Snapshot {} total assets {} != components {}",
                self.date, self.total_assets, sum
            ))
            .into());
        }
        Ok(())
    }

    /// `nav * units == total_assets` within tolerance.
    pub fn validate_nav(&self) -> Result<()> {
        let product = self.nav * self.units;
        if (product - self.total_assets).abs() >= NAV_TOLERANCE {
            return Err(NavError::InvariantViolated {
                product,
                total_assets: self.total_assets,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot() -> PortfolioSnapshot {
        PortfolioSnapshot {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            total_assets: dec!(100000),
            stocks_value: dec!(60000),
            options_value: dec!(5000),
            cash: dec!(35000),
            nav: dec!(100),
            units: dec!(1000),
        }
    }

    #[test]
    fn test_valid_snapshot_passes_both_checks() {
        let s = snapshot();
        assert!(s.validate_components().is_ok());
        assert!(s.validate_nav().is_ok());
    }

    #[test]
    fn test_nav_mismatch_is_rejected() {
        let s = PortfolioSnapshot {
            nav: dec!(100.01),
            ..snapshot()
        };
        assert!(matches!(
            s.validate_nav(),
            Err(crate::Error::Nav(NavError::InvariantViolated { .. }))
        ));
    }

    #[test]
    fn test_nav_tolerance_is_exclusive_at_one_cent() {
        let within = PortfolioSnapshot {
            total_assets: dec!(100000.009),
            ..snapshot()
        };
        assert!(within.validate_nav().is_ok());

        let at_limit = PortfolioSnapshot {
            total_assets: dec!(100000.01),
            ..snapshot()
        };
        assert!(at_limit.validate_nav().is_err());
    }

    #[test]
    fn test_component_mismatch_is_rejected() {
        let s = PortfolioSnapshot {
            cash: dec!(34000),
            ..snapshot()
        };
        assert!(s.validate_components().is_err());
    }
}
