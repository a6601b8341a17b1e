//! Navfolio Market Data Crate
//!
//! Provider-agnostic access to the two pieces of public market data the
//! tracker needs:
//! - spot FX rates, used by the core currency normalizer
//! - daily closes for benchmark symbols
//!
//! # Architecture
//!
//! ```text
//! core (fx normalizer, benchmarks)
//!          │
//!          ▼
//!   MarketDataProvider (trait)
//!          │
//!          ▼
//!    YahooProvider ──► Yahoo Finance
//! ```

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{fx_symbol, DailyClose};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
