//! Benchmark index closes used to compare against the NAV series.

mod benchmark_model;
mod benchmark_service;
mod benchmark_traits;

pub use benchmark_model::BenchmarkClose;
pub use benchmark_service::{benchmark_return, BenchmarkService};
pub use benchmark_traits::BenchmarkRepositoryTrait;
