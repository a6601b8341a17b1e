//! Market data provider abstraction and implementations.

mod traits;
pub mod yahoo;

pub use traits::MarketDataProvider;
