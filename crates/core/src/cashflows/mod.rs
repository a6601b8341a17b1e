//! Cashflow events and their external/internal classification.

mod cashflow_classifier;
mod cashflows_model;
mod cashflows_traits;

pub use cashflow_classifier::{classify_cashflow, is_external_cashflow, FlowType};
pub use cashflows_model::CashflowEvent;
pub use cashflows_traits::CashflowRepositoryTrait;
