//! Per-date position rows.

mod positions_model;
mod positions_traits;

pub use positions_model::Position;
pub use positions_traits::PositionRepositoryTrait;
