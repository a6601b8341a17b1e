//! SQLite storage for benchmark index closes.

mod model;
mod repository;

pub use model::BenchmarkCloseDB;
pub use repository::BenchmarkRepository;
