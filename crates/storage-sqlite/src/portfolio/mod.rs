pub mod pnl;
pub mod positions;
pub mod snapshot;
