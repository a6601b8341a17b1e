//! Database model for daily portfolio snapshots.

use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::{
    date_to_db, decimal_to_db, exact_decimal_to_db, try_date_from_db, try_decimal_from_db,
};
use navfolio_core::portfolio::snapshot::PortfolioSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::portfolio_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioSnapshotDB {
    pub date: String,
    pub total_assets: String,
    pub stocks: String,
    pub options: String,
    pub cash: String,
    pub nav: String,
    pub units: String,
}

/// A row that does not parse is an error: `nav` and `units` seed the next
/// day's computation, so they are never defaulted.
impl TryFrom<PortfolioSnapshotDB> for PortfolioSnapshot {
    type Error = StorageError;

    fn try_from(db: PortfolioSnapshotDB) -> Result<Self, Self::Error> {
        Ok(Self {
            date: try_date_from_db("date", &db.date)?,
            total_assets: try_decimal_from_db("total_assets", &db.total_assets)?,
            stocks_value: try_decimal_from_db("stocks", &db.stocks)?,
            options_value: try_decimal_from_db("options", &db.options)?,
            cash: try_decimal_from_db("cash", &db.cash)?,
            nav: try_decimal_from_db("nav", &db.nav)?,
            units: try_decimal_from_db("units", &db.units)?,
        })
    }
}

impl From<&PortfolioSnapshot> for PortfolioSnapshotDB {
    fn from(domain: &PortfolioSnapshot) -> Self {
        Self {
            date: date_to_db(domain.date),
            total_assets: decimal_to_db(domain.total_assets),
            stocks: decimal_to_db(domain.stocks_value),
            options: decimal_to_db(domain.options_value),
            cash: decimal_to_db(domain.cash),
            nav: exact_decimal_to_db(domain.nav),
            units: exact_decimal_to_db(domain.units),
        }
    }
}
