use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;

use navfolio_core::constants::DEFAULT_REPORTING_CURRENCY;

const MIN_REFRESH_SECS: u64 = 10;
const MAX_REFRESH_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub reporting_currency: String,
    pub gateway_host: String,
    pub gateway_port: u16,
    pub gateway_url: String,
    pub gateway_path: Option<PathBuf>,
    pub gateway_startup: Duration,
    pub start_date: NaiveDate,
    pub backfill_days: i64,
    pub refresh_interval: Duration,
    pub benchmarks: Vec<String>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unparseable values fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let parsed = |key: &str, default: u64| {
            var(key)
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(default)
        };

        let gateway_host = var("NAVFOLIO_GATEWAY_HOST").unwrap_or_else(|| "127.0.0.1".into());
        let gateway_port = var("NAVFOLIO_GATEWAY_PORT")
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(11111);
        let gateway_url = var("NAVFOLIO_GATEWAY_URL")
            .unwrap_or_else(|| format!("http://{}:{}", gateway_host, gateway_port));
        let start_date = var("NAVFOLIO_START_DATE")
            .and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
            .or_else(|| NaiveDate::from_ymd_opt(2024, 1, 1))
            .unwrap_or_default();
        let refresh_secs = parsed("NAVFOLIO_REFRESH_SECS", 60).clamp(MIN_REFRESH_SECS, MAX_REFRESH_SECS);
        let benchmarks = var("NAVFOLIO_BENCHMARKS")
            .unwrap_or_else(|| "SPY".into())
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        let log_format = match var("NAVFOLIO_LOG_FORMAT") {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            db_path: var("NAVFOLIO_DB_PATH").unwrap_or_else(|| "./db/navfolio.db".into()),
            reporting_currency: var("NAVFOLIO_REPORTING_CURRENCY")
                .map(|v| v.to_uppercase())
                .unwrap_or_else(|| DEFAULT_REPORTING_CURRENCY.into()),
            gateway_host,
            gateway_port,
            gateway_url,
            gateway_path: var("NAVFOLIO_GATEWAY_PATH").map(PathBuf::from),
            gateway_startup: Duration::from_secs(parsed("NAVFOLIO_GATEWAY_STARTUP_SECS", 15)),
            start_date,
            backfill_days: parsed("NAVFOLIO_BACKFILL_DAYS", 30) as i64,
            refresh_interval: Duration::from_secs(refresh_secs),
            benchmarks,
            log_format,
        }
    }
}
