use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::error;

use crate::utils::{decimal_from_db, decimal_to_db};
use navfolio_core::orders::{HistoricalOrder, OrderSide};

const EXECUTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::historical_orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoricalOrderDB {
    pub order_id: String,
    pub symbol: String,
    pub name: String,
    pub market: String,
    pub side: String,
    pub quantity: String,
    pub price: String,
    pub currency: String,
    pub executed_at: String,
}

pub(crate) const ORDER_COLUMNS: usize = 9;

impl From<HistoricalOrderDB> for HistoricalOrder {
    fn from(db: HistoricalOrderDB) -> Self {
        let executed_at = NaiveDateTime::parse_from_str(&db.executed_at, EXECUTED_AT_FORMAT)
            .unwrap_or_else(|e| {
                error!(
                    "Failed to parse executed_at '{}' of order {}: {}",
                    db.executed_at, db.order_id, e
                );
                NaiveDateTime::default()
            });
        Self {
            side: OrderSide::from_provider(&db.side),
            quantity: decimal_from_db("quantity", &db.quantity),
            price: decimal_from_db("price", &db.price),
            executed_at,
            order_id: db.order_id,
            symbol: db.symbol,
            name: db.name,
            market: db.market,
            currency: db.currency,
        }
    }
}

impl From<&HistoricalOrder> for HistoricalOrderDB {
    fn from(o: &HistoricalOrder) -> Self {
        Self {
            order_id: o.order_id.clone(),
            symbol: o.symbol.clone(),
            name: o.name.clone(),
            market: o.market.clone(),
            side: o.side.as_str().to_string(),
            quantity: decimal_to_db(o.quantity),
            price: decimal_to_db(o.price),
            currency: o.currency.clone(),
            executed_at: o.executed_at.format(EXECUTED_AT_FORMAT).to_string(),
        }
    }
}
