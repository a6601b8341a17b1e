//! SQLite storage for the `net_p_l` view.

mod model;
mod repository;

pub use model::NetPnlDB;
pub use repository::NetPnlRepository;
