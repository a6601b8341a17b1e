//! Navfolio tracker CLI.
//!
//! ```bash
//! # snapshot today (skipped when already stored)
//! navfolio run
//!
//! # re-run a past day with a longer cashflow look-back
//! navfolio run --date 2024-03-01 --backfill-days 90 --force
//!
//! # keep today's snapshot fresh
//! navfolio live
//!
//! # time-weighted return between two stored days
//! navfolio twr --from 2024-01-02 --to 2024-06-28
//! ```

mod config;
mod live;
mod main_lib;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use config::Config;
use main_lib::{build_state, init_tracing, AppState};
use navfolio_core::pipeline::RunOutcome;

#[derive(Parser)]
#[command(name = "navfolio")]
#[command(about = "Daily NAV/unit tracker for a broker account", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the account, persist the day's snapshot and NAV
    Run {
        /// Snapshot date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Days of cashflow history to fetch before the date
        #[arg(short, long)]
        backfill_days: Option<i64>,

        /// Recompute even when the date is already stored
        #[arg(short, long, default_value = "false")]
        force: bool,

        /// Leave the gateway running afterwards
        #[arg(long, default_value = "false")]
        keep_alive: bool,
    },

    /// Refresh today's snapshot periodically until interrupted
    Live,

    /// Time-weighted return between two stored dates, with benchmarks
    Twr {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        from: NaiveDate,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        to: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(config.log_format);
    let state = build_state(config).await?;

    match cli.command {
        Commands::Run {
            date,
            backfill_days,
            force,
            keep_alive,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            run_once(&state, date, backfill_days, force, keep_alive).await
        }
        Commands::Live => live::run_live(state).await,
        Commands::Twr { from, to } => report_twr(&state, from, to).await,
    }
}

async fn run_once(
    state: &AppState,
    date: NaiveDate,
    backfill_days: Option<i64>,
    force: bool,
    keep_alive: bool,
) -> anyhow::Result<()> {
    let request = state.run_request(date, backfill_days, force, keep_alive);
    let outcome = state.pipeline_service.run(request).await?;
    if let RunOutcome::Completed(summary) = &outcome {
        info!(
            "Stored {}: total {} nav {} units {}",
            summary.snapshot.date,
            summary.snapshot.total_assets,
            summary.snapshot.nav,
            summary.snapshot.units
        );
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

async fn report_twr(state: &AppState, from: NaiveDate, to: NaiveDate) -> anyhow::Result<()> {
    anyhow::ensure!(from <= to, "--from must not be after --to");

    let portfolio = state.performance_service.twr(from, to)?;
    let mut report = serde_json::Map::new();
    report.insert("from".into(), serde_json::json!(from));
    report.insert("to".into(), serde_json::json!(to));
    report.insert("portfolio".into(), serde_json::json!(portfolio));

    for symbol in &state.config.benchmarks {
        if let Err(e) = state.benchmark_service.sync(symbol, from, to).await {
            warn!("Could not refresh benchmark {}: {}", symbol, e);
        }
        let benchmark = state.benchmark_service.benchmark_return(symbol, from, to)?;
        report.insert(symbol.clone(), serde_json::json!(benchmark));
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
