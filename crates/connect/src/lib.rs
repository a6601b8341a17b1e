//! Navfolio Connect - access to the broker's local trading gateway.
//!
//! The gateway is a separate process listening on a local port. This crate
//! starts and stops it ([`GatewayProcess`]), talks to its JSON bridge
//! ([`GatewayClient`]), respects its request quota ([`RequestQuota`]) and
//! exposes the result as a `navfolio_core` [`AccountDataSource`].
//!
//! [`AccountDataSource`]: navfolio_core::ingest::AccountDataSource

pub mod cashflow_history;
pub mod client;
pub mod errors;
pub mod gateway;
pub mod quota;
pub mod source;

pub use cashflow_history::{fetch_cashflow_history, MAX_DAY_RETRIES};
pub use client::{GatewayApi, GatewayClient};
pub use errors::{GatewayError, GatewayResult};
pub use gateway::{GatewayConfig, GatewayLease, GatewayProcess};
pub use quota::RequestQuota;
pub use source::GatewayAccountSource;
