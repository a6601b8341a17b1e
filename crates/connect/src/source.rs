use async_trait::async_trait;
use chrono::{NaiveTime, Utc};
use log::info;
use std::sync::Arc;

use crate::cashflow_history::fetch_cashflow_history;
use crate::client::GatewayApi;
use crate::gateway::GatewayProcess;
use crate::quota::RequestQuota;
use navfolio_core::errors::Result;
use navfolio_core::ingest::{AccountDataSource, FetchRequest, RawAccountState};

/// [`AccountDataSource`] backed by the local trading gateway.
///
/// Every fetch holds a gateway lease for its whole duration, so the gateway
/// is stopped afterwards unless the request asks to keep it alive.
pub struct GatewayAccountSource {
    process: Arc<GatewayProcess>,
    api: Arc<dyn GatewayApi>,
    quota: Arc<RequestQuota>,
    summary_currency: String,
}

impl GatewayAccountSource {
    pub fn new(
        process: Arc<GatewayProcess>,
        api: Arc<dyn GatewayApi>,
        quota: Arc<RequestQuota>,
        summary_currency: &str,
    ) -> Self {
        Self {
            process,
            api,
            quota,
            summary_currency: summary_currency.to_uppercase(),
        }
    }
}

#[async_trait]
impl AccountDataSource for GatewayAccountSource {
    async fn fetch_account_state(&self, request: &FetchRequest) -> Result<RawAccountState> {
        let _lease = self.process.acquire(request.keep_alive).await?;

        let summary = self
            .api
            .get_account_summary(&self.summary_currency)
            .await?;
        let positions = self.api.get_positions().await?;
        let cashflows = fetch_cashflow_history(
            self.api.as_ref(),
            &self.quota,
            request.as_of,
            request.cashflow_start,
        )
        .await?;

        let orders_end = if request.as_of >= Utc::now().date_naive() {
            Utc::now().naive_utc()
        } else {
            request.as_of.and_time(NaiveTime::MIN) + chrono::Duration::days(1)
        };
        let orders = self
            .api
            .get_filled_orders(request.orders_start.and_time(NaiveTime::MIN), orders_end)
            .await?;

        info!(
            "Fetched account state: {} positions, {} cashflows, {} orders",
            positions.len(),
            cashflows.len(),
            orders.len()
        );

        Ok(RawAccountState {
            summary,
            positions,
            cashflows,
            orders,
        })
    }
}
