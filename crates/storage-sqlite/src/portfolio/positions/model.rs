use diesel::prelude::*;

use crate::utils::{date_from_db, date_to_db, decimal_from_db, decimal_to_db};
use navfolio_core::portfolio::positions::Position;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PositionDB {
    pub symbol: String,
    pub date: String,
    pub name: String,
    pub market: String,
    pub quantity: String,
    pub diluted_cost: String,
    pub market_value: String,
    pub current_price: String,
    pub pl_percent: String,
    pub pl: String,
    pub today_pl: String,
    pub currency: String,
    pub portfolio_percent: String,
}

pub(crate) const POSITION_COLUMNS: usize = 13;

impl From<PositionDB> for Position {
    fn from(db: PositionDB) -> Self {
        Self {
            date: date_from_db("date", &db.date),
            quantity: decimal_from_db("quantity", &db.quantity),
            diluted_cost: decimal_from_db("diluted_cost", &db.diluted_cost),
            market_value: decimal_from_db("market_value", &db.market_value),
            current_price: decimal_from_db("current_price", &db.current_price),
            pl_percent: decimal_from_db("pl_percent", &db.pl_percent),
            pl: decimal_from_db("pl", &db.pl),
            today_pl: decimal_from_db("today_pl", &db.today_pl),
            portfolio_percent: decimal_from_db("portfolio_percent", &db.portfolio_percent),
            symbol: db.symbol,
            name: db.name,
            market: db.market,
            currency: db.currency,
        }
    }
}

impl From<&Position> for PositionDB {
    fn from(p: &Position) -> Self {
        Self {
            symbol: p.symbol.clone(),
            date: date_to_db(p.date),
            name: p.name.clone(),
            market: p.market.clone(),
            quantity: decimal_to_db(p.quantity),
            diluted_cost: decimal_to_db(p.diluted_cost),
            market_value: decimal_to_db(p.market_value),
            current_price: decimal_to_db(p.current_price),
            pl_percent: decimal_to_db(p.pl_percent),
            pl: decimal_to_db(p.pl),
            today_pl: decimal_to_db(p.today_pl),
            currency: p.currency.clone(),
            portfolio_percent: decimal_to_db(p.portfolio_percent),
        }
    }
}
