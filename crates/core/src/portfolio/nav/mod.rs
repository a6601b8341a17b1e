//! NAV/unit accounting.
//!
//! Market movement changes the NAV per unit; external cashflows issue or
//! redeem units at the day's NAV and leave it unchanged.

mod nav_engine;
mod nav_model;
mod nav_service;

pub use nav_engine::{compute_nav, net_external_cashflow};
pub use nav_model::{NavComputation, NavState};
pub use nav_service::NavService;
