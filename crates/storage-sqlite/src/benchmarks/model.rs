use diesel::prelude::*;

use crate::utils::{date_from_db, date_to_db, decimal_from_db, decimal_to_db};
use navfolio_core::benchmarks::BenchmarkClose;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::benchmark_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BenchmarkCloseDB {
    pub date: String,
    pub symbol: String,
    pub close: String,
    pub currency: String,
}

pub(crate) const BENCHMARK_COLUMNS: usize = 4;

impl From<BenchmarkCloseDB> for BenchmarkClose {
    fn from(db: BenchmarkCloseDB) -> Self {
        Self {
            date: date_from_db("date", &db.date),
            close: decimal_from_db("close", &db.close),
            symbol: db.symbol,
            currency: db.currency,
        }
    }
}

impl From<&BenchmarkClose> for BenchmarkCloseDB {
    fn from(c: &BenchmarkClose) -> Self {
        Self {
            date: date_to_db(c.date),
            symbol: c.symbol.clone(),
            close: decimal_to_db(c.close),
            currency: c.currency.clone(),
        }
    }
}
