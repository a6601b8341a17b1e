use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{BenchmarkCloseDB, BENCHMARK_COLUMNS};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::utils::{chunk_for_sqlite, date_from_db, date_to_db};
use navfolio_core::benchmarks::{BenchmarkClose, BenchmarkRepositoryTrait};
use navfolio_core::errors::Result;

pub struct BenchmarkRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BenchmarkRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BenchmarkRepositoryTrait for BenchmarkRepository {
    async fn upsert_closes(&self, closes: &[BenchmarkClose]) -> Result<usize> {
        use crate::schema::benchmark_history::dsl::*;
        if closes.is_empty() {
            return Ok(0);
        }
        let rows: Vec<BenchmarkCloseDB> = closes.iter().map(BenchmarkCloseDB::from).collect();
        self.writer
            .exec(move |conn| {
                let mut written = 0;
                for chunk in chunk_for_sqlite(&rows, BENCHMARK_COLUMNS) {
                    written += diesel::replace_into(benchmark_history)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(written)
            })
            .await
    }

    fn get_closes(
        &self,
        benchmark: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<BenchmarkClose>> {
        use crate::schema::benchmark_history::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        let rows = benchmark_history
            .filter(symbol.eq(benchmark.to_string()))
            .filter(date.ge(date_to_db(start)))
            .filter(date.le(date_to_db(end)))
            .order(date.asc())
            .select(BenchmarkCloseDB::as_select())
            .load::<BenchmarkCloseDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(BenchmarkClose::from).collect())
    }

    fn latest_close_date(&self, benchmark: &str) -> Result<Option<NaiveDate>> {
        use crate::schema::benchmark_history::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        let latest = benchmark_history
            .filter(symbol.eq(benchmark.to_string()))
            .select(diesel::dsl::max(date))
            .first::<Option<String>>(&mut conn)
            .into_core()?;
        Ok(latest.map(|raw| date_from_db("date", &raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use navfolio_core::benchmarks::benchmark_return;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (BenchmarkRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (BenchmarkRepository::new(pool, writer), temp_dir)
    }

    fn close(sym: &str, d: u32, value: Decimal) -> BenchmarkClose {
        BenchmarkClose {
            date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            symbol: sym.to_string(),
            close: value,
            currency: "USD".to_string(),
        }
    }

    #[tokio::test]
    async fn test_latest_close_date_per_symbol() {
        let (repo, _dir) = create_test_repository().await;
        assert_eq!(repo.latest_close_date("SPY").unwrap(), None);

        repo.upsert_closes(&[
            close("SPY", 1, dec!(500)),
            close("SPY", 4, dec!(510)),
            close("QQQ", 8, dec!(430)),
        ])
        .await
        .unwrap();

        assert_eq!(
            repo.latest_close_date("SPY").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 4)
        );
    }

    #[tokio::test]
    async fn test_stored_closes_feed_benchmark_return() {
        let (repo, _dir) = create_test_repository().await;
        repo.upsert_closes(&[close("SPY", 1, dec!(500)), close("SPY", 4, dec!(550))])
            .await
            .unwrap();
        repo.upsert_closes(&[close("SPY", 4, dec!(525))]).await.unwrap();

        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let closes = repo.get_closes("SPY", start, end).unwrap();

        assert_eq!(closes.len(), 2);
        assert_eq!(benchmark_return(&closes), Some(dec!(0.05)));
    }
}
