//! Navfolio Core - domain entities, services, and traits.
//!
//! This crate holds the NAV/unit accounting engine and everything it needs:
//! currency normalisation, snapshot building, cashflow classification,
//! the net P&L aggregator and the pipeline that ties them together.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` and `connect` crates.

pub mod benchmarks;
pub mod cashflows;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod ingest;
pub mod instruments;
pub mod orders;
pub mod pipeline;
pub mod portfolio;

pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
