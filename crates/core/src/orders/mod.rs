//! Filled historical orders.

mod orders_model;
mod orders_traits;

pub use orders_model::{HistoricalOrder, OrderSide};
pub use orders_traits::OrderRepositoryTrait;
