use chrono::NaiveDate;
use log::{info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::{RunOutcome, RunRequest, RunSummary};
use crate::cashflows::CashflowRepositoryTrait;
use crate::errors::Result;
use crate::fx::{CurrencyNormalizerTrait, RateBucket};
use crate::ingest::{normalize_account_state, AccountDataSource, FetchRequest};
use crate::orders::OrderRepositoryTrait;
use crate::portfolio::nav::NavService;
use crate::portfolio::pnl::{NetPnlRepositoryTrait, PnlService};
use crate::portfolio::positions::PositionRepositoryTrait;
use crate::portfolio::snapshot::{SnapshotBuilder, SnapshotRepositoryTrait};

/// Store handles the pipeline writes through.
#[derive(Clone)]
pub struct PipelineRepositories {
    pub snapshots: Arc<dyn SnapshotRepositoryTrait>,
    pub positions: Arc<dyn PositionRepositoryTrait>,
    pub orders: Arc<dyn OrderRepositoryTrait>,
    pub cashflows: Arc<dyn CashflowRepositoryTrait>,
    pub net_pnl: Arc<dyn NetPnlRepositoryTrait>,
}

pub struct PipelineService {
    data_source: Arc<dyn AccountDataSource>,
    normalizer: Arc<dyn CurrencyNormalizerTrait>,
    repositories: PipelineRepositories,
    builder: SnapshotBuilder,
    nav_service: NavService,
    pnl_service: PnlService,
    reporting_currency: String,
    orders_start: NaiveDate,
}

impl PipelineService {
    pub fn new(
        data_source: Arc<dyn AccountDataSource>,
        normalizer: Arc<dyn CurrencyNormalizerTrait>,
        repositories: PipelineRepositories,
        reporting_currency: &str,
        orders_start: NaiveDate,
    ) -> Self {
        let builder = SnapshotBuilder::new(normalizer.clone(), reporting_currency);
        let nav_service = NavService::new(
            repositories.snapshots.clone(),
            repositories.cashflows.clone(),
            normalizer.clone(),
            reporting_currency,
        );
        let pnl_service = PnlService::new(
            repositories.orders.clone(),
            repositories.positions.clone(),
            repositories.net_pnl.clone(),
        );
        Self {
            data_source,
            normalizer,
            repositories,
            builder,
            nav_service,
            pnl_service,
            reporting_currency: reporting_currency.to_string(),
            orders_start,
        }
    }

    pub async fn run(&self, request: RunRequest) -> Result<RunOutcome> {
        let date = request.date;
        if !request.force && self.repositories.snapshots.exists(date)? {
            info!("Portfolio snapshot for {} already exists. Skipping run.", date);
            return Ok(RunOutcome::Skipped { date });
        }

        let bucket = RateBucket::from_datetime(request.run_at);
        let raw = self
            .data_source
            .fetch_account_state(&FetchRequest {
                as_of: date,
                cashflow_start: request.backfill_start,
                orders_start: self.orders_start,
                keep_alive: request.keep_alive,
            })
            .await?;

        let state = normalize_account_state(&raw, date, &self.reporting_currency)?;
        let cash = self
            .normalizer
            .convert(
                state.summary.cash,
                &state.summary.currency,
                &self.reporting_currency,
                &bucket,
            )
            .await;

        let built = self.builder.build(date, state.positions, cash, &bucket).await;
        built.snapshot.validate_components()?;
        let drift = (built.snapshot.total_assets - state.summary.total_assets).abs();
        if state.summary.currency == self.reporting_currency
            && drift > built.snapshot.total_assets.abs() / Decimal::ONE_HUNDRED
        {
            warn!(
                "Computed total assets {} differ from account summary {} by more than 1%",
                built.snapshot.total_assets, state.summary.total_assets
            );
        }

        let positions_written = self
            .repositories
            .positions
            .replace_positions_for_date(date, &built.positions)
            .await?;
        let orders_written = self.repositories.orders.upsert_orders(&state.orders).await?;
        let cashflows_written = if state.cashflows.is_empty() {
            info!("Skipping cashflow update due to empty results.");
            0
        } else {
            self.repositories
                .cashflows
                .upsert_cashflows(&state.cashflows)
                .await?
        };

        let computation = self
            .nav_service
            .compute_for(date, built.snapshot.total_assets, &bucket)
            .await?;
        let snapshot = built.snapshot.with_nav(computation.next);
        snapshot.validate_nav()?;
        self.repositories.snapshots.upsert_snapshot(&snapshot).await?;

        let net_pnl = self.pnl_service.refresh(date).await?;

        info!(
            "Stored snapshot {}: total {} nav {} units {}",
            date, snapshot.total_assets, snapshot.nav, snapshot.units
        );
        Ok(RunOutcome::Completed(RunSummary {
            snapshot,
            net_external_cashflow: computation.net_external_cashflow,
            positions_written,
            orders_written,
            cashflows_written,
            net_pnl_rows: net_pnl.len(),
        }))
    }
}
