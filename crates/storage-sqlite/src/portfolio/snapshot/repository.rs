use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::PortfolioSnapshotDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{is_missing_table, IntoCore, StorageError};
use crate::utils::date_to_db;
use navfolio_core::errors::{Error, Result};
use navfolio_core::portfolio::nav::NavState;
use navfolio_core::portfolio::snapshot::{PortfolioSnapshot, SnapshotRepositoryTrait};

pub struct SnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn to_domain(row: PortfolioSnapshotDB) -> Result<PortfolioSnapshot> {
        PortfolioSnapshot::try_from(row).map_err(Error::from)
    }

    fn find_before(&self, target_date: NaiveDate) -> Result<Option<PortfolioSnapshotDB>> {
        use crate::schema::portfolio_snapshots::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        let result = portfolio_snapshots
            .filter(date.lt(date_to_db(target_date)))
            .order(date.desc())
            .select(PortfolioSnapshotDB::as_select())
            .first::<PortfolioSnapshotDB>(&mut conn)
            .optional();
        match result {
            Err(e) if is_missing_table(&e) => Ok(None),
            other => other.into_core(),
        }
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    fn exists(&self, target_date: NaiveDate) -> Result<bool> {
        use crate::schema::portfolio_snapshots::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        let count = portfolio_snapshots
            .filter(date.eq(date_to_db(target_date)))
            .count()
            .get_result::<i64>(&mut conn);
        match count {
            Ok(n) => Ok(n > 0),
            Err(e) if is_missing_table(&e) => {
                debug!("portfolio_snapshots does not exist yet; treating {} as absent", target_date);
                Ok(false)
            }
            Err(e) => Err(StorageError::from(e).into()),
        }
    }

    fn latest_prior(&self, target_date: NaiveDate) -> Result<NavState> {
        match self.find_before(target_date)? {
            Some(row) => Ok(Self::to_domain(row)?.nav_state()),
            None => Ok(NavState::default()),
        }
    }

    async fn upsert_snapshot(&self, snapshot: &PortfolioSnapshot) -> Result<()> {
        use crate::schema::portfolio_snapshots::dsl::*;
        let row = PortfolioSnapshotDB::from(snapshot);
        debug!("Upserting snapshot for {}", row.date);
        self.writer
            .exec(move |conn| {
                diesel::replace_into(portfolio_snapshots)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    fn get_snapshot(&self, target_date: NaiveDate) -> Result<Option<PortfolioSnapshot>> {
        use crate::schema::portfolio_snapshots::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        portfolio_snapshots
            .find(date_to_db(target_date))
            .select(PortfolioSnapshotDB::as_select())
            .first::<PortfolioSnapshotDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Self::to_domain)
            .transpose()
    }

    fn get_snapshot_before(&self, target_date: NaiveDate) -> Result<Option<PortfolioSnapshot>> {
        self.find_before(target_date)?.map(Self::to_domain).transpose()
    }

    fn get_latest_snapshot(&self) -> Result<Option<PortfolioSnapshot>> {
        use crate::schema::portfolio_snapshots::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        portfolio_snapshots
            .order(date.desc())
            .select(PortfolioSnapshotDB::as_select())
            .first::<PortfolioSnapshotDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Self::to_domain)
            .transpose()
    }

    fn get_snapshots(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PortfolioSnapshot>> {
        use crate::schema::portfolio_snapshots::dsl::*;
        let mut conn = get_connection(&self.pool)?;
        let mut query = portfolio_snapshots.into_boxed();
        if let Some(start) = start_date {
            query = query.filter(date.ge(date_to_db(start)));
        }
        if let Some(end) = end_date {
            query = query.filter(date.le(date_to_db(end)));
        }
        let rows = query
            .order(date.asc())
            .select(PortfolioSnapshotDB::as_select())
            .load::<PortfolioSnapshotDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(Self::to_domain).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (SnapshotRepository, Arc<DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        let repo = SnapshotRepository::new(Arc::clone(&pool), writer);
        (repo, pool, temp_dir)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn snapshot(d: u32, total: Decimal, nav: Decimal, units: Decimal) -> PortfolioSnapshot {
        PortfolioSnapshot {
            date: day(d),
            total_assets: total,
            stocks_value: total - dec!(1000),
            options_value: Decimal::ZERO,
            cash: dec!(1000),
            nav,
            units,
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_row_for_same_date() {
        let (repo, _pool, _dir) = create_test_repository().await;

        repo.upsert_snapshot(&snapshot(1, dec!(100000), dec!(100), dec!(1000)))
            .await
            .unwrap();
        repo.upsert_snapshot(&snapshot(1, dec!(101000), dec!(101), dec!(1000)))
            .await
            .unwrap();

        let all = repo.get_snapshots(None, None).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].total_assets, dec!(101000));
        assert_eq!(all[0].nav, dec!(101));
    }

    #[tokio::test]
    async fn test_exists_distinguishes_dates() {
        let (repo, _pool, _dir) = create_test_repository().await;
        assert!(!repo.exists(day(1)).unwrap());

        repo.upsert_snapshot(&snapshot(1, dec!(100000), dec!(100), dec!(1000)))
            .await
            .unwrap();

        assert!(repo.exists(day(1)).unwrap());
        assert!(!repo.exists(day(2)).unwrap());
    }

    #[tokio::test]
    async fn test_exists_and_latest_prior_tolerate_missing_table() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("fresh.db");
        let pool = create_pool(&db_path.to_string_lossy()).unwrap();
        let writer = spawn_writer((*pool).clone());
        let repo = SnapshotRepository::new(Arc::clone(&pool), writer);

        assert!(!repo.exists(day(1)).unwrap());
        assert_eq!(repo.latest_prior(day(1)).unwrap(), NavState::default());
    }

    #[tokio::test]
    async fn test_latest_prior_is_strictly_before_date() {
        let (repo, _pool, _dir) = create_test_repository().await;
        assert_eq!(repo.latest_prior(day(5)).unwrap(), NavState::default());

        repo.upsert_snapshot(&snapshot(1, dec!(100000), dec!(100), dec!(1000)))
            .await
            .unwrap();
        repo.upsert_snapshot(&snapshot(3, dec!(103000), dec!(103), dec!(1000)))
            .await
            .unwrap();

        let prior = repo.latest_prior(day(3)).unwrap();
        assert_eq!(prior.nav, dec!(100));
        assert_eq!(prior.units, dec!(1000));

        let prior = repo.latest_prior(day(4)).unwrap();
        assert_eq!(prior.nav, dec!(103));
    }

    #[tokio::test]
    async fn test_nav_and_units_keep_full_scale() {
        let (repo, _pool, _dir) = create_test_repository().await;
        repo.upsert_snapshot(&snapshot(
            2,
            dec!(20012345.671234567),
            dec!(20000),
            dec!(1000.6172835),
        ))
        .await
        .unwrap();

        let stored = repo.get_snapshot(day(2)).unwrap().unwrap();
        assert_eq!(stored.total_assets, dec!(20012345.671235));
        assert_eq!(stored.nav, dec!(20000));
        assert_eq!(stored.units, dec!(1000.6172835));

        let prior = repo.latest_prior(day(3)).unwrap();
        assert_eq!(prior.units, dec!(1000.6172835));
    }

    #[tokio::test]
    async fn test_same_upsert_twice_leaves_identical_row() {
        let (repo, pool, _dir) = create_test_repository().await;
        let load = || {
            use crate::schema::portfolio_snapshots::dsl::*;
            let mut conn = get_connection(&pool).unwrap();
            portfolio_snapshots
                .select(PortfolioSnapshotDB::as_select())
                .load::<PortfolioSnapshotDB>(&mut conn)
                .unwrap()
        };
        let s = snapshot(1, dec!(100000), dec!(100), dec!(1000));

        repo.upsert_snapshot(&s).await.unwrap();
        let once = load();
        repo.upsert_snapshot(&s).await.unwrap();

        assert_eq!(load(), once);
        assert_eq!(once.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupted_units_surface_as_error() {
        let (repo, pool, _dir) = create_test_repository().await;
        repo.upsert_snapshot(&snapshot(1, dec!(100000), dec!(100), dec!(1000)))
            .await
            .unwrap();
        let mut conn = get_connection(&pool).unwrap();
        diesel::sql_query("UPDATE portfolio_snapshots SET units = 'n/a' WHERE date = '2024-03-01'")
            .execute(&mut conn)
            .unwrap();

        let err = repo.latest_prior(day(2)).unwrap_err();
        assert!(matches!(err, Error::Database(_)));
        assert!(err.to_string().contains("units"));
        assert!(repo.get_snapshots(None, None).is_err());
    }

    #[tokio::test]
    async fn test_range_queries_are_ascending_and_inclusive() {
        let (repo, _pool, _dir) = create_test_repository().await;
        for d in [4, 1, 3, 2] {
            repo.upsert_snapshot(&snapshot(d, dec!(100000), dec!(100), dec!(1000)))
                .await
                .unwrap();
        }

        let dates: Vec<_> = repo
            .get_snapshots(Some(day(2)), Some(day(3)))
            .unwrap()
            .into_iter()
            .map(|s| s.date)
            .collect();
        assert_eq!(dates, vec![day(2), day(3)]);

        assert_eq!(repo.get_latest_snapshot().unwrap().unwrap().date, day(4));
        assert_eq!(repo.get_snapshot_before(day(4)).unwrap().unwrap().date, day(3));
    }
}
