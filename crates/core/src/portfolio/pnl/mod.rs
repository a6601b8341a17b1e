//! Net P&L per instrument: realized order flow plus unrealized holdings.

mod pnl_aggregator;
mod pnl_model;
mod pnl_service;
mod pnl_traits;

pub use pnl_aggregator::{aggregate_net_pnl, unrealized_contribution};
pub use pnl_model::{NetPnlKey, NetPnlRecord};
pub use pnl_service::PnlService;
pub use pnl_traits::NetPnlRepositoryTrait;
