//! Ingestion boundary: raw provider rows, the data-source trait and the
//! normalisation into typed domain records.

mod ingest_model;
mod ingest_normalizer;
mod ingest_traits;

pub use ingest_model::*;
pub use ingest_normalizer::*;
pub use ingest_traits::*;
