//! SQLite storage for filled orders.

mod model;
mod repository;

pub use model::HistoricalOrderDB;
pub use repository::OrderRepository;

pub use navfolio_core::orders::OrderRepositoryTrait;
