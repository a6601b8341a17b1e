//! FX (Foreign Exchange) module - spot rates, hourly cache and the currency normalizer.

mod currency_normalizer;
mod fallback;
mod fx_errors;
mod fx_model;
mod fx_traits;
mod market_data_rates;
mod rate_cache;

pub use currency_normalizer::CurrencyNormalizer;
pub use fallback::fallback_rate;
pub use fx_errors::FxError;
pub use fx_model::{RateBucket, RateSource, ResolvedRate};
pub use fx_traits::{CurrencyNormalizerTrait, SpotRateProvider};
pub use market_data_rates::MarketDataSpotRates;
pub use rate_cache::{RateCache, DEFAULT_RATE_CACHE_CAPACITY};
