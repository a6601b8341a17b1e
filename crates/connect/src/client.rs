//! JSON client for the gateway's HTTP bridge.
//!
//! Every endpoint answers with an envelope `{"ret": 0, "data": ..., "msg": ...}`
//! where a non-zero `ret` is a gateway-side failure.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::{GatewayError, GatewayResult};
use navfolio_core::ingest::{RawAccountSummary, RawCashflow, RawOrder, RawPosition};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const GATEWAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Account queries the gateway exposes, in the provider's native schema.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    /// Account summary with monetary fields expressed in `currency`.
    async fn get_account_summary(&self, currency: &str) -> GatewayResult<RawAccountSummary>;

    async fn get_positions(&self) -> GatewayResult<Vec<RawPosition>>;

    /// Cashflow rows for a single clearing date. This endpoint is rate limited.
    async fn get_cashflow(&self, clearing_date: NaiveDate) -> GatewayResult<Vec<RawCashflow>>;

    /// Historical orders updated within `[start, end]`.
    async fn get_filled_orders(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> GatewayResult<Vec<RawOrder>>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ret: i32,
    data: Option<T>,
    #[serde(default)]
    msg: Option<String>,
}

fn unwrap_envelope<T: Default>(envelope: Envelope<T>) -> GatewayResult<T> {
    if envelope.ret != 0 {
        return Err(GatewayError::Api {
            ret: envelope.ret,
            message: envelope.msg.unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    Ok(envelope.data.unwrap_or_default())
}

fn decode<T: DeserializeOwned + Default>(body: &str) -> GatewayResult<T> {
    let envelope: Envelope<T> = serde_json::from_str(body).map_err(|e| {
        GatewayError::Decode(format!(
            "{} - {}",
            e,
            body.chars().take(200).collect::<String>()
        ))
    })?;
    unwrap_envelope(envelope)
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    async fn get<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> GatewayResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[Gateway] GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GatewayError::Http(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }
        decode(&body)
    }
}

#[async_trait]
impl GatewayApi for GatewayClient {
    async fn get_account_summary(&self, currency: &str) -> GatewayResult<RawAccountSummary> {
        let rows: Vec<RawAccountSummary> = self
            .get("/trade/account", &[("currency", currency.to_string())])
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode("account summary was empty".to_string()))
    }

    async fn get_positions(&self) -> GatewayResult<Vec<RawPosition>> {
        self.get("/trade/positions", &[]).await
    }

    async fn get_cashflow(&self, clearing_date: NaiveDate) -> GatewayResult<Vec<RawCashflow>> {
        self.get(
            "/trade/cashflow",
            &[("clearing_date", clearing_date.format("%Y-%m-%d").to_string())],
        )
        .await
    }

    async fn get_filled_orders(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> GatewayResult<Vec<RawOrder>> {
        self.get(
            "/trade/history-orders",
            &[
                ("start", start.format(GATEWAY_DATETIME_FORMAT).to_string()),
                ("end", end.format(GATEWAY_DATETIME_FORMAT).to_string()),
            ],
        )
        .await
    }
}
