//! Market data models.

mod quote;

pub use quote::{fx_symbol, DailyClose};
