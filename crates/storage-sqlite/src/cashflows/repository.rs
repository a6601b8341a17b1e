use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::{CashflowDB, CASHFLOW_COLUMNS};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::utils::{chunk_for_sqlite, date_to_db};
use navfolio_core::cashflows::{CashflowEvent, CashflowRepositoryTrait};
use navfolio_core::errors::Result;

pub struct CashflowRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CashflowRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CashflowRepositoryTrait for CashflowRepository {
    async fn upsert_cashflows(&self, events: &[CashflowEvent]) -> Result<usize> {
        use crate::schema::cashflow::dsl::*;
        if events.is_empty() {
            return Ok(0);
        }
        let rows: Vec<CashflowDB> = events.iter().map(CashflowDB::from).collect();
        debug!("Upserting {} cashflow events", rows.len());
        self.writer
            .exec(move |conn| {
                let mut written = 0;
                for chunk in chunk_for_sqlite(&rows, CASHFLOW_COLUMNS) {
                    written += diesel::replace_into(cashflow)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(written)
            })
            .await
    }

    fn get_external_cashflows(&self, target_date: NaiveDate) -> Result<Vec<CashflowEvent>> {
        use crate::schema::cashflow::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        let rows = cashflow
            .filter(date.eq(date_to_db(target_date)))
            .filter(is_external.eq(true))
            .order(cashflow_id.asc())
            .select(CashflowDB::as_select())
            .load::<CashflowDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(CashflowEvent::from).collect())
    }

    fn get_cashflows_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CashflowEvent>> {
        use crate::schema::cashflow::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        let rows = cashflow
            .filter(date.ge(date_to_db(start)))
            .filter(date.le(date_to_db(end)))
            .order((date.asc(), cashflow_id.asc()))
            .select(CashflowDB::as_select())
            .load::<CashflowDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(CashflowEvent::from).collect())
    }
}
