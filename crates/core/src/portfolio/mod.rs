//! Portfolio module: snapshots, positions, NAV/unit accounting, net P&L
//! and read-side performance metrics.

pub mod nav;
pub mod performance;
pub mod pnl;
pub mod positions;
pub mod snapshot;

pub use nav::*;
pub use pnl::*;
pub use positions::*;
pub use snapshot::*;
