//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The symbol exists but has no quotes in the requested period.
    #[error("No data for date range")]
    NoDataForRange,

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },
}

impl MarketDataError {
    /// Whether the failure is worth retrying on a later cycle.
    ///
    /// Unknown symbols and empty ranges will not change by asking again.
    pub fn is_transient(&self) -> bool {
        matches!(self, MarketDataError::ProviderError { .. })
    }
}
