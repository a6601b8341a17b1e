use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::{PositionDB, POSITION_COLUMNS};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::utils::{chunk_for_sqlite, date_to_db};
use navfolio_core::errors::Result;
use navfolio_core::portfolio::positions::{Position, PositionRepositoryTrait};

pub struct PositionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PositionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PositionRepositoryTrait for PositionRepository {
    async fn replace_positions_for_date(
        &self,
        target_date: NaiveDate,
        new_positions: &[Position],
    ) -> Result<usize> {
        use crate::schema::positions::dsl::*;

        let day = date_to_db(target_date);
        let rows: Vec<PositionDB> = new_positions
            .iter()
            .map(|p| {
                let mut row = PositionDB::from(p);
                row.date = day.clone();
                row
            })
            .collect();
        debug!("Replacing {} positions for {}", rows.len(), day);

        self.writer
            .exec(move |conn| {
                diesel::delete(positions.filter(date.eq(&day)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let mut written = 0;
                for chunk in chunk_for_sqlite(&rows, POSITION_COLUMNS) {
                    written += diesel::replace_into(positions)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(written)
            })
            .await
    }

    fn get_positions(&self, target_date: NaiveDate) -> Result<Vec<Position>> {
        use crate::schema::positions::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        let rows = positions
            .filter(date.eq(date_to_db(target_date)))
            .select(PositionDB::as_select())
            .load::<PositionDB>(&mut conn)
            .into_core()?;

        // Values are TEXT, so ordering happens after decoding.
        let mut result: Vec<Position> = rows.into_iter().map(Position::from).collect();
        result.sort_by(|a, b| b.market_value.cmp(&a.market_value));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (PositionRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (PositionRepository::new(pool, writer), temp_dir)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn position(symbol: &str, d: u32, market_value: Decimal) -> Position {
        Position {
            symbol: symbol.to_string(),
            name: format!("{symbol} Inc"),
            market: "US".to_string(),
            quantity: dec!(10),
            diluted_cost: dec!(90),
            market_value,
            current_price: market_value / dec!(10),
            pl_percent: dec!(11.11),
            pl: dec!(100),
            today_pl: dec!(5),
            currency: "USD".to_string(),
            portfolio_percent: dec!(1.5),
            date: day(d),
        }
    }

    #[tokio::test]
    async fn test_reingesting_a_date_replaces_its_rows() {
        let (repo, _dir) = create_test_repository().await;

        repo.replace_positions_for_date(
            day(1),
            &[position("AAPL", 1, dec!(1000)), position("MSFT", 1, dec!(2000))],
        )
        .await
        .unwrap();
        let written = repo
            .replace_positions_for_date(day(1), &[position("AAPL", 1, dec!(1100))])
            .await
            .unwrap();

        assert_eq!(written, 1);
        let stored = repo.get_positions(day(1)).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].symbol, "AAPL");
        assert_eq!(stored[0].market_value, dec!(1100));
    }

    #[tokio::test]
    async fn test_other_dates_are_untouched() {
        let (repo, _dir) = create_test_repository().await;

        repo.replace_positions_for_date(day(1), &[position("AAPL", 1, dec!(1000))])
            .await
            .unwrap();
        repo.replace_positions_for_date(day(2), &[position("AAPL", 2, dec!(1200))])
            .await
            .unwrap();

        assert_eq!(repo.get_positions(day(1)).unwrap()[0].market_value, dec!(1000));
        assert_eq!(repo.get_positions(day(2)).unwrap()[0].market_value, dec!(1200));
    }

    #[tokio::test]
    async fn test_positions_come_back_by_market_value_descending() {
        let (repo, _dir) = create_test_repository().await;
        repo.replace_positions_for_date(
            day(1),
            &[
                position("AAPL", 1, dec!(900)),
                position("MSFT", 1, dec!(10000)),
                position("TSLA", 1, dec!(2500)),
            ],
        )
        .await
        .unwrap();

        let symbols: Vec<_> = repo
            .get_positions(day(1))
            .unwrap()
            .into_iter()
            .map(|p| p.symbol)
            .collect();
        assert_eq!(symbols, vec!["MSFT", "TSLA", "AAPL"]);
    }

    #[tokio::test]
    async fn test_large_batches_are_chunked() {
        let (repo, _dir) = create_test_repository().await;
        let many: Vec<Position> = (0..120)
            .map(|i| position(&format!("SYM{i}"), 1, Decimal::from(i)))
            .collect();

        let written = repo.replace_positions_for_date(day(1), &many).await.unwrap();

        assert_eq!(written, 120);
        assert_eq!(repo.get_positions(day(1)).unwrap().len(), 120);
    }
}
