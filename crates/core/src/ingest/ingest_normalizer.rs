//! Raw rows to domain records.

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, warn};

use super::{
    AccountSummary, NormalizedAccountState, RawAccountState, RawAccountSummary, RawCashflow,
    RawOrder, RawPosition,
};
use crate::cashflows::{is_external_cashflow, CashflowEvent};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, ORDER_STATUS_FILLED_ALL};
use crate::errors::{Result, ValidationError};
use crate::instruments::extract_ticker;
use crate::orders::{HistoricalOrder, OrderSide};
use crate::portfolio::positions::Position;
use rust_decimal::Decimal;

const DP: u32 = DISPLAY_DECIMAL_PRECISION;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_date(value: &str) -> Result<NaiveDate> {
    // Some rows carry a time component after the date.
    let date_part = value.trim().get(..10).unwrap_or(value);
    Ok(NaiveDate::parse_from_str(date_part, "%Y-%m-%d")?)
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    let date = parse_date(value)?;
    date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        ValidationError::InvalidInput(format!("Invalid timestamp '{}'", value)).into()
    })
}

pub fn normalize_account_summary(
    raw: &RawAccountSummary,
    default_currency: &str,
) -> AccountSummary {
    AccountSummary {
        total_assets: raw.total_assets.round_dp(DP),
        securities_assets: raw.securities_assets.round_dp(DP),
        bond_assets: raw.bond_assets.round_dp(DP),
        cash: (raw.fund_assets + raw.cash).round_dp(DP),
        currency: raw
            .currency
            .clone()
            .unwrap_or_else(|| default_currency.to_string()),
    }
}

pub fn normalize_position(raw: &RawPosition, date: NaiveDate) -> Result<Position> {
    Ok(Position {
        symbol: extract_ticker(&raw.code)?,
        name: raw.stock_name.clone(),
        market: raw.position_market.clone(),
        quantity: raw.qty.round_dp(DP),
        diluted_cost: raw.diluted_cost.round_dp(DP),
        market_value: raw.market_val.round_dp(DP),
        current_price: raw.nominal_price.round_dp(DP),
        pl_percent: raw.pl_ratio.round_dp(DP),
        pl: raw.pl_val.round_dp(DP),
        today_pl: raw.today_pl_val.round_dp(DP),
        currency: raw.currency.clone(),
        portfolio_percent: Decimal::ZERO,
        date,
    })
}

/// Positions for `date`, ordered by market value descending.
pub fn normalize_positions(raw: &[RawPosition], date: NaiveDate) -> Result<Vec<Position>> {
    let mut positions = raw
        .iter()
        .map(|p| normalize_position(p, date))
        .collect::<Result<Vec<_>>>()?;
    positions.sort_by(|a, b| b.market_value.cmp(&a.market_value));
    Ok(positions)
}

pub fn normalize_cashflow(raw: &RawCashflow) -> Result<CashflowEvent> {
    if raw.cashflow_id.trim().is_empty() {
        return Err(ValidationError::MissingField("cashflow_id".to_string()).into());
    }
    Ok(CashflowEvent {
        cashflow_id: raw.cashflow_id.clone(),
        date: parse_date(&raw.clearing_date)?,
        currency: raw.currency.clone(),
        cashflow_type: raw.cashflow_type.clone(),
        direction: raw.cashflow_direction.clone(),
        amount: raw.cashflow_amount.round_dp(DP),
        remark: raw.cashflow_remark.clone(),
        is_external: is_external_cashflow(&raw.cashflow_type, &raw.cashflow_remark),
    })
}

pub fn normalize_cashflows(raw: &[RawCashflow]) -> Result<Vec<CashflowEvent>> {
    raw.iter().map(normalize_cashflow).collect()
}

pub fn normalize_order(raw: &RawOrder) -> Result<HistoricalOrder> {
    Ok(HistoricalOrder {
        order_id: raw.order_id.clone(),
        symbol: extract_ticker(&raw.code)?,
        name: raw.stock_name.clone(),
        market: raw.order_market.clone(),
        side: OrderSide::from_provider(&raw.trd_side),
        quantity: raw.qty,
        price: raw.price,
        currency: raw.currency.clone(),
        executed_at: parse_datetime(&raw.updated_time)?,
    })
}

/// Fully filled orders only.
pub fn normalize_orders(raw: &[RawOrder]) -> Result<Vec<HistoricalOrder>> {
    let filled: Vec<&RawOrder> = raw
        .iter()
        .filter(|o| o.order_status == ORDER_STATUS_FILLED_ALL)
        .collect();
    if filled.len() < raw.len() {
        debug!("Dropped {} orders that are not fully filled", raw.len() - filled.len());
    }
    filled.into_iter().map(normalize_order).collect()
}

pub fn normalize_account_state(
    raw: &RawAccountState,
    date: NaiveDate,
    reporting_currency: &str,
) -> Result<NormalizedAccountState> {
    let state = NormalizedAccountState {
        summary: normalize_account_summary(&raw.summary, reporting_currency),
        positions: normalize_positions(&raw.positions, date)?,
        cashflows: normalize_cashflows(&raw.cashflows)?,
        orders: normalize_orders(&raw.orders)?,
    };
    if state.cashflows.is_empty() {
        warn!("No cashflow data found for the requested period");
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
    }

    fn raw_position(code: &str, market_val: Decimal) -> RawPosition {
        RawPosition {
            code: code.to_string(),
            stock_name: "Name".to_string(),
            position_market: "US".to_string(),
            qty: dec!(10.004),
            diluted_cost: dec!(99.999),
            market_val,
            nominal_price: dec!(101.125),
            pl_ratio: dec!(1.1234),
            pl_val: dec!(11.255),
            today_pl_val: dec!(0.5),
            currency: "USD".to_string(),
        }
    }

    fn raw_order(id: &str, status: &str) -> RawOrder {
        RawOrder {
            code: "US.AAPL".to_string(),
            stock_name: "Apple".to_string(),
            order_market: "US".to_string(),
            trd_side: "BUY".to_string(),
            order_id: id.to_string(),
            qty: dec!(10),
            price: dec!(100),
            currency: "USD".to_string(),
            order_status: status.to_string(),
            updated_time: "2024-03-08 09:31:02.512".to_string(),
        }
    }

    #[test]
    fn test_positions_rounded_and_sorted() {
        let raw = vec![
            raw_position("US.AAPL", dec!(500.126)),
            raw_position("US.MSFT", dec!(900)),
        ];
        let positions = normalize_positions(&raw, date()).unwrap();
        assert_eq!(positions[0].symbol, "MSFT");
        assert_eq!(positions[1].symbol, "AAPL");
        assert_eq!(positions[1].market_value, dec!(500.13));
        assert_eq!(positions[1].quantity, dec!(10.00));
        assert_eq!(positions[1].pl_percent, dec!(1.12));
        assert_eq!(positions[1].date, date());
    }

    #[test]
    fn test_unrecognised_code_is_rejected() {
        let raw = vec![raw_position("AAPL", dec!(1))];
        assert!(normalize_positions(&raw, date()).is_err());
    }

    #[test]
    fn test_summary_cash_includes_fund_assets() {
        let raw = RawAccountSummary {
            total_assets: dec!(1000.004),
            securities_assets: dec!(600),
            fund_assets: dec!(150.111),
            bond_assets: dec!(0),
            cash: dec!(249.888),
            currency: None,
            us_cash: None,
            sg_cash: None,
            usd_assets: None,
            sgd_assets: None,
        };
        let summary = normalize_account_summary(&raw, "SGD");
        assert_eq!(summary.cash, dec!(400.00));
        assert_eq!(summary.total_assets, dec!(1000.00));
        assert_eq!(summary.currency, "SGD");
    }

    #[test]
    fn test_orders_keep_filled_only() {
        let raw = vec![
            raw_order("1", "FILLED_ALL"),
            raw_order("2", "CANCELLED_ALL"),
            raw_order("3", "FILLED_PART"),
        ];
        let orders = normalize_orders(&raw).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, "1");
        assert_eq!(orders[0].side, OrderSide::Buy);
        assert_eq!(
            orders[0].executed_at,
            NaiveDate::from_ymd_opt(2024, 3, 8)
                .unwrap()
                .and_hms_milli_opt(9, 31, 2, 512)
                .unwrap()
        );
    }

    #[test]
    fn test_cashflow_classified_on_ingestion() {
        let raw = RawCashflow {
            cashflow_id: "77".to_string(),
            clearing_date: "2024-03-08".to_string(),
            currency: "USD".to_string(),
            cashflow_type: "Deposit".to_string(),
            cashflow_direction: "IN".to_string(),
            cashflow_amount: dec!(2500.555),
            cashflow_remark: "FAST".to_string(),
        };
        let event = normalize_cashflow(&raw).unwrap();
        assert!(event.is_external);
        assert_eq!(event.amount, dec!(2500.56));
        assert_eq!(event.date, date());

        let dividend = RawCashflow {
            cashflow_type: "Deposit".to_string(),
            cashflow_remark: "AAPL dividend".to_string(),
            ..raw
        };
        assert!(!normalize_cashflow(&dividend).unwrap().is_external);
    }

    #[test]
    fn test_parse_datetime_accepts_plain_date() {
        let dt = parse_datetime("2024-03-08").unwrap();
        assert_eq!(dt.date(), date());
    }
}
