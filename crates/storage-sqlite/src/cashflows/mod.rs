//! SQLite storage for cashflow events.

mod model;
mod repository;

pub use model::CashflowDB;
pub use repository::CashflowRepository;

pub use navfolio_core::cashflows::CashflowRepositoryTrait;
