//! Pure performance metrics over stored snapshots and net P&L rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::{Allocation, DailyDeltas, TickerPnl};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::instruments::{base_ticker, instrument_kind, InstrumentKind};
use crate::portfolio::pnl::NetPnlRecord;
use crate::portfolio::snapshot::{portfolio_percent, PortfolioSnapshot};

/// Time-weighted return between two snapshot dates, as a fraction.
///
/// `None` when either date has no snapshot or the starting NAV is zero.
pub fn twr(series: &[PortfolioSnapshot], start: NaiveDate, end: NaiveDate) -> Option<Decimal> {
    let nav_on = |date: NaiveDate| series.iter().find(|s| s.date == date).map(|s| s.nav);
    let begin = nav_on(start)?;
    let finish = nav_on(end)?;
    (finish - begin).checked_div(begin)
}

pub fn daily_deltas(current: &PortfolioSnapshot, previous: &PortfolioSnapshot) -> DailyDeltas {
    let round = |d: Decimal| d.round_dp(DISPLAY_DECIMAL_PRECISION);
    let total = |s: &PortfolioSnapshot| s.stocks_value + s.options_value + s.cash;
    DailyDeltas {
        date: current.date,
        previous_date: previous.date,
        total: round(total(current) - total(previous)),
        stocks: round(current.stocks_value - previous.stocks_value),
        options: round(current.options_value - previous.options_value),
        cash: round(current.cash - previous.cash),
        nav: round(current.nav - previous.nav),
    }
}

pub fn allocation(snapshot: &PortfolioSnapshot) -> Allocation {
    let total = snapshot.stocks_value + snapshot.options_value + snapshot.cash;
    Allocation {
        date: snapshot.date,
        total,
        stocks_percent: portfolio_percent(snapshot.stocks_value, total),
        options_percent: portfolio_percent(snapshot.options_value, total),
        cash_percent: portfolio_percent(snapshot.cash, total),
    }
}

/// Pivots net P&L rows of one market into per-ticker stock/option/total
/// columns. Option rows are grouped under their underlying's root letters.
pub fn pnl_by_ticker(records: &[NetPnlRecord], market: &str) -> Vec<TickerPnl> {
    let mut pivot: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

    for record in records.iter().filter(|r| r.market == market) {
        let entry = pivot
            .entry(base_ticker(&record.symbol))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match instrument_kind(&record.symbol) {
            InstrumentKind::Equity => entry.0 += record.net_pnl,
            InstrumentKind::Option => entry.1 += record.net_pnl,
        }
    }

    let round = |d: Decimal| d.round_dp(DISPLAY_DECIMAL_PRECISION);
    pivot
        .into_iter()
        .map(|(ticker, (stock, option))| TickerPnl {
            ticker,
            stock: round(stock),
            option: round(option),
            total: round(stock + option),
        })
        .collect()
}
