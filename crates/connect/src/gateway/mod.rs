//! Lifecycle of the local trading gateway process.

mod process;

pub use process::{GatewayConfig, GatewayLease, GatewayProcess};
