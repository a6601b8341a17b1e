//! SQLite storage for per-date position rows.

mod model;
mod repository;

pub use model::PositionDB;
pub use repository::PositionRepository;

pub use navfolio_core::portfolio::positions::PositionRepositoryTrait;
