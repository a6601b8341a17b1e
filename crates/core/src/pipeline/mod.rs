//! Daily pipeline: fetch, normalise, snapshot, NAV, persist, net P&L.

mod pipeline_model;
mod pipeline_service;

pub use pipeline_model::{RunOutcome, RunRequest, RunSummary};
pub use pipeline_service::{PipelineRepositories, PipelineService};
