//! Periodic refresh loop for a dashboard that stays open all day.

use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::main_lib::AppState;
use navfolio_core::pipeline::RunOutcome;

/// Re-runs today's pipeline every refresh interval until Ctrl-C.
///
/// Each tick overwrites today's rows. The gateway is kept alive between
/// ticks and stopped when the loop ends. A failed tick is logged and the
/// previous snapshot stays the latest valid state.
pub async fn run_live(state: Arc<AppState>) -> anyhow::Result<()> {
    let period = state.config.refresh_interval;
    info!("Live refresh every {:?}", period);

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => refresh_once(&state).await,
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping live refresh");
                break;
            }
        }
    }

    state.gateway.stop();
    Ok(())
}

async fn refresh_once(state: &AppState) {
    let today = chrono::Local::now().date_naive();
    let request = state.run_request(today, Some(0), true, true);

    match state.pipeline_service.run(request).await {
        Ok(RunOutcome::Completed(summary)) => info!(
            "Refreshed {}: total {} nav {} units {}",
            summary.snapshot.date,
            summary.snapshot.total_assets,
            summary.snapshot.nav,
            summary.snapshot.units
        ),
        Ok(RunOutcome::Skipped { date }) => info!("Nothing to refresh for {}", date),
        Err(e) => warn!("Refresh failed, keeping last snapshot: {}", e),
    }
}
