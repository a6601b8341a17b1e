//! SQLite storage for daily portfolio snapshots.

mod model;
mod repository;

pub use model::PortfolioSnapshotDB;
pub use repository::SnapshotRepository;

pub use navfolio_core::portfolio::snapshot::SnapshotRepositoryTrait;
