//! SQLite storage implementation for Navfolio.
//!
//! Implements the repository traits defined in `navfolio-core` with Diesel:
//! connection pooling, embedded migrations, the single-writer actor and the
//! per-table models.
//!
//! ```text
//! core (domain)   connect (gateway)
//!       │                │
//!       └───────┬────────┘
//!               ▼
//!       storage-sqlite (this crate)
//!               │
//!               ▼
//!           SQLite DB
//! ```
//!
//! Reads use pooled connections. Every write goes through [`WriteHandle`],
//! which runs it inside an IMMEDIATE transaction on a dedicated connection.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

pub mod benchmarks;
pub mod cashflows;
pub mod orders;
pub mod portfolio;

pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use errors::{IntoCore, StorageError};

pub use benchmarks::BenchmarkRepository;
pub use cashflows::CashflowRepository;
pub use orders::OrderRepository;
pub use portfolio::pnl::NetPnlRepository;
pub use portfolio::positions::PositionRepository;
pub use portfolio::snapshot::SnapshotRepository;

pub use navfolio_core::errors::{DatabaseError, Error, Result};
