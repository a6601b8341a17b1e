use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::{NetPnlDB, NET_PNL_COLUMNS};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::utils::chunk_for_sqlite;
use navfolio_core::errors::Result;
use navfolio_core::portfolio::pnl::{NetPnlRecord, NetPnlRepositoryTrait};

pub struct NetPnlRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl NetPnlRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl NetPnlRepositoryTrait for NetPnlRepository {
    async fn replace_net_pnl(&self, records: &[NetPnlRecord]) -> Result<usize> {
        use crate::schema::net_p_l::dsl::*;
        let rows: Vec<NetPnlDB> = records.iter().map(NetPnlDB::from).collect();
        self.writer
            .exec(move |conn| {
                let removed = diesel::delete(net_p_l)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                debug!("Cleared {} net P&L rows", removed);
                let mut written = 0;
                for chunk in chunk_for_sqlite(&rows, NET_PNL_COLUMNS) {
                    written += diesel::replace_into(net_p_l)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(written)
            })
            .await
    }

    fn get_net_pnl(&self, market_filter: Option<&str>) -> Result<Vec<NetPnlRecord>> {
        use crate::schema::net_p_l::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        let mut query = net_p_l.into_boxed();
        if let Some(m) = market_filter {
            query = query.filter(market.eq(m.to_string()));
        }
        let rows = query
            .order((symbol.asc(), market.asc(), currency.asc()))
            .select(NetPnlDB::as_select())
            .load::<NetPnlDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(NetPnlRecord::from).collect())
    }
}
