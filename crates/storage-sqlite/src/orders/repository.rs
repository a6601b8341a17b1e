use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::{HistoricalOrderDB, ORDER_COLUMNS};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::utils::chunk_for_sqlite;
use navfolio_core::errors::Result;
use navfolio_core::orders::{HistoricalOrder, OrderRepositoryTrait};

pub struct OrderRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl OrderRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl OrderRepositoryTrait for OrderRepository {
    async fn upsert_orders(&self, orders: &[HistoricalOrder]) -> Result<usize> {
        use crate::schema::historical_orders::dsl::*;
        if orders.is_empty() {
            return Ok(0);
        }
        let rows: Vec<HistoricalOrderDB> = orders.iter().map(HistoricalOrderDB::from).collect();
        debug!("Upserting {} filled orders", rows.len());
        self.writer
            .exec(move |conn| {
                let mut written = 0;
                for chunk in chunk_for_sqlite(&rows, ORDER_COLUMNS) {
                    written += diesel::replace_into(historical_orders)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(written)
            })
            .await
    }

    fn get_orders(&self) -> Result<Vec<HistoricalOrder>> {
        use crate::schema::historical_orders::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        let rows = historical_orders
            .order((executed_at.asc(), order_id.asc()))
            .select(HistoricalOrderDB::as_select())
            .load::<HistoricalOrderDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(HistoricalOrder::from).collect())
    }
}
