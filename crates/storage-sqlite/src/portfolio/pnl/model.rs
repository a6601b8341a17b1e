use diesel::prelude::*;

use crate::utils::{decimal_from_db, decimal_to_db};
use navfolio_core::portfolio::pnl::NetPnlRecord;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::net_p_l)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NetPnlDB {
    pub symbol: String,
    pub market: String,
    pub currency: String,
    pub net_pnl: String,
}

pub(crate) const NET_PNL_COLUMNS: usize = 4;

impl From<NetPnlDB> for NetPnlRecord {
    fn from(db: NetPnlDB) -> Self {
        Self {
            net_pnl: decimal_from_db("net_p_l", &db.net_pnl),
            symbol: db.symbol,
            market: db.market,
            currency: db.currency,
        }
    }
}

impl From<&NetPnlRecord> for NetPnlDB {
    fn from(r: &NetPnlRecord) -> Self {
        Self {
            symbol: r.symbol.clone(),
            market: r.market.clone(),
            currency: r.currency.clone(),
            net_pnl: decimal_to_db(r.net_pnl),
        }
    }
}
