use diesel::prelude::*;

use crate::utils::{date_from_db, date_to_db, decimal_from_db, decimal_to_db};
use navfolio_core::cashflows::CashflowEvent;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::cashflow)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CashflowDB {
    pub cashflow_id: String,
    pub date: String,
    pub currency: String,
    pub cashflow_type: String,
    pub direction: String,
    pub amount: String,
    pub remark: String,
    pub is_external: bool,
}

pub(crate) const CASHFLOW_COLUMNS: usize = 8;

impl From<CashflowDB> for CashflowEvent {
    fn from(db: CashflowDB) -> Self {
        Self {
            date: date_from_db("date", &db.date),
            amount: decimal_from_db("amount", &db.amount),
            cashflow_id: db.cashflow_id,
            currency: db.currency,
            cashflow_type: db.cashflow_type,
            direction: db.direction,
            remark: db.remark,
            is_external: db.is_external,
        }
    }
}

impl From<&CashflowEvent> for CashflowDB {
    fn from(e: &CashflowEvent) -> Self {
        Self {
            cashflow_id: e.cashflow_id.clone(),
            date: date_to_db(e.date),
            currency: e.currency.clone(),
            cashflow_type: e.cashflow_type.clone(),
            direction: e.direction.clone(),
            amount: decimal_to_db(e.amount),
            remark: e.remark.clone(),
            is_external: e.is_external,
        }
    }
}
