use std::sync::Arc;

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};
use navfolio_connect::{
    GatewayAccountSource, GatewayClient, GatewayConfig, GatewayProcess, RequestQuota,
};
use navfolio_core::benchmarks::BenchmarkService;
use navfolio_core::fx::{CurrencyNormalizer, MarketDataSpotRates};
use navfolio_core::pipeline::{PipelineRepositories, PipelineService, RunRequest};
use navfolio_core::portfolio::performance::PerformanceService;
use navfolio_market_data::{MarketDataProvider, YahooProvider};
use navfolio_storage_sqlite::{
    db, BenchmarkRepository, CashflowRepository, NetPnlRepository, OrderRepository,
    PositionRepository, SnapshotRepository,
};

pub struct AppState {
    pub config: Config,
    pub pipeline_service: Arc<PipelineService>,
    pub performance_service: Arc<PerformanceService>,
    pub benchmark_service: Arc<BenchmarkService>,
    pub gateway: Arc<GatewayProcess>,
}

impl AppState {
    /// Request for `date` with the configured cashflow look-back.
    pub fn run_request(
        &self,
        date: NaiveDate,
        backfill_days: Option<i64>,
        force: bool,
        keep_alive: bool,
    ) -> RunRequest {
        let days = backfill_days.unwrap_or(self.config.backfill_days).max(0);
        RunRequest {
            date,
            backfill_start: date - ChronoDuration::days(days),
            force,
            keep_alive,
            run_at: Utc::now(),
        }
    }
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let snapshots = Arc::new(SnapshotRepository::new(pool.clone(), writer.clone()));
    let net_pnl = Arc::new(NetPnlRepository::new(pool.clone(), writer.clone()));
    let repositories = PipelineRepositories {
        snapshots: snapshots.clone(),
        positions: Arc::new(PositionRepository::new(pool.clone(), writer.clone())),
        orders: Arc::new(OrderRepository::new(pool.clone(), writer.clone())),
        cashflows: Arc::new(CashflowRepository::new(pool.clone(), writer.clone())),
        net_pnl: net_pnl.clone(),
    };
    let benchmark_repository = Arc::new(BenchmarkRepository::new(pool.clone(), writer));

    let market_data: Arc<dyn MarketDataProvider> = Arc::new(YahooProvider::new()?);
    let normalizer = Arc::new(CurrencyNormalizer::new(Arc::new(MarketDataSpotRates::new(
        market_data.clone(),
    ))));

    let gateway = Arc::new(GatewayProcess::new(GatewayConfig {
        host: config.gateway_host.clone(),
        port: config.gateway_port,
        executable: config.gateway_path.clone(),
        startup_timeout: config.gateway_startup,
        ..GatewayConfig::default()
    }));
    let client = Arc::new(GatewayClient::new(&config.gateway_url)?);
    let source = Arc::new(GatewayAccountSource::new(
        gateway.clone(),
        client,
        Arc::new(RequestQuota::default()),
        &config.reporting_currency,
    ));

    let pipeline_service = Arc::new(PipelineService::new(
        source,
        normalizer,
        repositories,
        &config.reporting_currency,
        config.start_date,
    ));
    let performance_service = Arc::new(PerformanceService::new(snapshots, net_pnl));
    let benchmark_service = Arc::new(BenchmarkService::new(market_data, benchmark_repository));

    Ok(Arc::new(AppState {
        config,
        pipeline_service,
        performance_service,
        benchmark_service,
        gateway,
    }))
}
