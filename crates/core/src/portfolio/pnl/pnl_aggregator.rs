use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::{NetPnlKey, NetPnlRecord};
use crate::instruments::InstrumentKind;
use crate::orders::HistoricalOrder;
use crate::portfolio::positions::Position;

/// Unrealized leg of a held position.
///
/// Options contribute their stored P&L, equities their stored market value.
pub fn unrealized_contribution(position: &Position) -> Decimal {
    match position.kind() {
        InstrumentKind::Option => position.pl,
        InstrumentKind::Equity => position.market_value,
    }
}

/// Net P&L per `(symbol, market, currency)`: signed fill flows of every
/// order plus the unrealized leg of every held position.
pub fn aggregate_net_pnl(orders: &[HistoricalOrder], positions: &[Position]) -> Vec<NetPnlRecord> {
    let mut totals: BTreeMap<NetPnlKey, Decimal> = BTreeMap::new();

    let realized = orders.iter().map(|o| {
        (
            NetPnlKey {
                symbol: o.symbol.clone(),
                market: o.market.clone(),
                currency: o.currency.clone(),
            },
            o.realized_flow(),
        )
    });
    let unrealized = positions.iter().map(|p| {
        (
            NetPnlKey {
                symbol: p.symbol.clone(),
                market: p.market.clone(),
                currency: p.currency.clone(),
            },
            unrealized_contribution(p),
        )
    });

    for (key, amount) in realized.chain(unrealized) {
        *totals.entry(key).or_insert(Decimal::ZERO) += amount;
    }

    totals
        .into_iter()
        .map(|(key, net_pnl)| NetPnlRecord {
            symbol: key.symbol,
            market: key.market,
            currency: key.currency,
            net_pnl,
        })
        .collect()
}
