//! Day-by-day cashflow history, newest clearing date first.

use chrono::NaiveDate;
use log::{info, warn};

use crate::client::GatewayApi;
use crate::errors::{GatewayError, GatewayResult};
use crate::quota::RequestQuota;
use navfolio_core::ingest::RawCashflow;

/// Retries of a single day's request before the whole fetch fails.
pub const MAX_DAY_RETRIES: u32 = 3;

/// Requests every clearing date from `newest` back to `oldest` (inclusive).
///
/// Each request takes a slot from `quota`. A failed request waits out a full
/// window, starts a fresh one and is retried up to [`MAX_DAY_RETRIES`] times.
pub async fn fetch_cashflow_history(
    api: &dyn GatewayApi,
    quota: &RequestQuota,
    newest: NaiveDate,
    oldest: NaiveDate,
) -> GatewayResult<Vec<RawCashflow>> {
    let mut rows = Vec::new();
    let mut current = newest;
    let mut failures = 0u32;

    while current >= oldest {
        quota.acquire().await;
        match api.get_cashflow(current).await {
            Ok(day_rows) => {
                rows.extend(day_rows);
                failures = 0;
                match current.pred_opt() {
                    Some(prev) => current = prev,
                    None => break,
                }
            }
            Err(e) => {
                failures += 1;
                if failures > MAX_DAY_RETRIES {
                    return Err(GatewayError::RetriesExhausted {
                        date: current,
                        attempts: failures,
                        last_error: e.to_string(),
                    });
                }
                warn!(
                    "Cashflow request for {} failed ({}), retrying after {:?}",
                    current,
                    e,
                    quota.window()
                );
                tokio::time::sleep(quota.window()).await;
                quota.reset();
            }
        }
    }

    if rows.is_empty() {
        warn!("No cashflow rows between {} and {}", oldest, newest);
    } else {
        info!("Fetched {} cashflow rows between {} and {}", rows.len(), oldest, newest);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use navfolio_core::ingest::{RawAccountSummary, RawOrder, RawPosition};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Serves one cashflow per requested day, failing a configured number
    /// of times for chosen dates.
    #[derive(Default)]
    struct ScriptedGateway {
        failures: Mutex<HashMap<NaiveDate, u32>>,
        requested: Mutex<Vec<NaiveDate>>,
    }

    impl ScriptedGateway {
        fn failing(date: NaiveDate, times: u32) -> Self {
            let gateway = Self::default();
            gateway.failures.lock().unwrap().insert(date, times);
            gateway
        }
    }

    #[async_trait]
    impl GatewayApi for ScriptedGateway {
        async fn get_account_summary(&self, _currency: &str) -> GatewayResult<RawAccountSummary> {
            unreachable!()
        }

        async fn get_positions(&self) -> GatewayResult<Vec<RawPosition>> {
            unreachable!()
        }

        async fn get_cashflow(&self, clearing_date: NaiveDate) -> GatewayResult<Vec<RawCashflow>> {
            self.requested.lock().unwrap().push(clearing_date);
            let mut failures = self.failures.lock().unwrap();
            if let Some(left) = failures.get_mut(&clearing_date) {
                if *left > 0 {
                    *left -= 1;
                    return Err(GatewayError::Api {
                        ret: -1,
                        message: "frequency limit".to_string(),
                    });
                }
            }
            Ok(vec![RawCashflow {
                cashflow_id: clearing_date.to_string(),
                clearing_date: clearing_date.to_string(),
                currency: "SGD".to_string(),
                cashflow_type: "DEPOSIT".to_string(),
                cashflow_direction: "IN".to_string(),
                cashflow_amount: dec!(100),
                cashflow_remark: String::new(),
            }])
        }

        async fn get_filled_orders(
            &self,
            _start: NaiveDateTime,
            _end: NaiveDateTime,
        ) -> GatewayResult<Vec<RawOrder>> {
            unreachable!()
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_walks_from_newest_to_oldest() {
        let gateway = ScriptedGateway::default();
        let quota = RequestQuota::default();

        let rows = fetch_cashflow_history(&gateway, &quota, day(5), day(3))
            .await
            .unwrap();

        assert_eq!(*gateway.requested.lock().unwrap(), vec![day(5), day(4), day(3)]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].clearing_date, "2024-01-05");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_range_makes_no_requests() {
        let gateway = ScriptedGateway::default();
        let quota = RequestQuota::default();

        let rows = fetch_cashflow_history(&gateway, &quota, day(2), day(3))
            .await
            .unwrap();

        assert!(rows.is_empty());
        assert!(gateway.requested.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quota_forces_wait_between_windows() {
        let gateway = ScriptedGateway::default();
        let quota = RequestQuota::new(2, Duration::from_secs(30), Duration::from_secs(1));
        let start = Instant::now();

        fetch_cashflow_history(&gateway, &quota, day(3), day(1))
            .await
            .unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_day_is_retried_after_a_window() {
        let gateway = ScriptedGateway::failing(day(4), 2);
        let quota = RequestQuota::default();
        let start = Instant::now();

        let rows = fetch_cashflow_history(&gateway, &quota, day(5), day(4))
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            *gateway.requested.lock().unwrap(),
            vec![day(5), day(4), day(4), day(4)]
        );
        assert_eq!(start.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let gateway = ScriptedGateway::failing(day(4), 10);
        let quota = RequestQuota::default();

        let err = fetch_cashflow_history(&gateway, &quota, day(5), day(1))
            .await
            .unwrap_err();

        match err {
            GatewayError::RetriesExhausted { date, attempts, .. } => {
                assert_eq!(date, day(4));
                assert_eq!(attempts, MAX_DAY_RETRIES + 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
