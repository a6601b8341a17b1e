mod performance_calculator;
pub mod performance_model;
pub mod performance_service;

pub use performance_calculator::{allocation, daily_deltas, pnl_by_ticker, twr};
pub use performance_model::*;
pub use performance_service::*;
