//! Gateway error types.

use chrono::NaiveDate;
use navfolio_core::errors::Error;
use thiserror::Error;

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway at {addr} did not become ready within {secs}s")]
    StartupTimeout { addr: String, secs: u64 },

    #[error("No gateway executable configured and nothing is listening on {addr}")]
    NotConfigured { addr: String },

    #[error("Failed to start gateway: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Gateway request failed: {0}")]
    Http(String),

    #[error("Gateway returned error (ret={ret}): {message}")]
    Api { ret: i32, message: String },

    #[error("Failed to decode gateway response: {0}")]
    Decode(String),

    #[error("Cashflow request for {date} failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        date: NaiveDate,
        attempts: u32,
        last_error: String,
    },
}

impl GatewayError {
    /// Failures worth another attempt on the next request window.
    pub fn is_transient(&self) -> bool {
        matches!(self, GatewayError::Http(_) | GatewayError::Api { .. })
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Http(err.to_string())
        }
    }
}

impl From<GatewayError> for Error {
    fn from(err: GatewayError) -> Self {
        Error::DataSource(err.to_string())
    }
}
