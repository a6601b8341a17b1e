use thiserror::Error;

/// Errors raised while looking up exchange rates.
///
/// These never escape the normalizer; it falls back to the static table.
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Rate {from}->{to} unavailable: {reason}")]
    RateUnavailable {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("Invalid rate bucket: {0}")]
    InvalidBucket(String),
}
