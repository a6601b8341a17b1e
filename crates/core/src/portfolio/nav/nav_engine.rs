use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::NavState;
use crate::cashflows::CashflowEvent;
use crate::constants::SEED_UNITS;
use crate::errors::NavError;
use crate::fx::{CurrencyNormalizerTrait, RateBucket};

/// Computes today's `(nav, units)` from today's total assets, today's net
/// external cashflow and yesterday's state.
///
/// Initial state (`prev.units == 0`): units are seeded and
/// `nav = total_assets / units`.
///
/// Steady state:
/// - `nav = (total_assets - net_cashflow) / prev.units`
/// - `units = prev.units + net_cashflow / nav`
///
/// so that `nav * units == total_assets`.
pub fn compute_nav(
    total_assets: Decimal,
    net_cashflow: Decimal,
    prev: NavState,
) -> Result<NavState, NavError> {
    if prev.units < Decimal::ZERO {
        return Err(NavError::InvalidPriorState {
            prev_nav: prev.nav,
            prev_units: prev.units,
        });
    }

    if prev.is_initial() {
        let units = SEED_UNITS;
        let nav = total_assets
            .checked_div(units)
            .ok_or(NavError::Overflow("seed nav"))?;
        if nav.is_zero() {
            return Err(NavError::ZeroNav {
                total_assets,
                net_cashflow,
            });
        }
        return Ok(NavState { nav, units });
    }

    if prev.nav.is_zero() {
        return Err(NavError::InvalidPriorState {
            prev_nav: prev.nav,
            prev_units: prev.units,
        });
    }

    let market_value = total_assets
        .checked_sub(net_cashflow)
        .ok_or(NavError::Overflow("market value"))?;
    let nav = market_value
        .checked_div(prev.units)
        .ok_or(NavError::Overflow("nav"))?;
    if nav.is_zero() {
        return Err(NavError::ZeroNav {
            total_assets,
            net_cashflow,
        });
    }

    let issued = net_cashflow
        .checked_div(nav)
        .ok_or(NavError::Overflow("issued units"))?;
    let units = prev.units + issued;
    if units <= Decimal::ZERO {
        return Err(NavError::NonPositiveUnits(units));
    }

    Ok(NavState { nav, units })
}

/// Signed sum of the external events dated `date`, converted into
/// `reporting_currency`.
pub async fn net_external_cashflow(
    events: &[CashflowEvent],
    date: NaiveDate,
    reporting_currency: &str,
    normalizer: &dyn CurrencyNormalizerTrait,
    bucket: &RateBucket,
) -> Decimal {
    let mut total = Decimal::ZERO;
    for event in events.iter().filter(|e| e.is_external && e.date == date) {
        total += normalizer
            .convert(event.amount, &event.currency, reporting_currency, bucket)
            .await;
    }
    total
}
