// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod handler;
mod stats;

pub use handler::{HandlerOutcome, PipelineHandler, PipelineSettings};
pub use stats::InvocationStats;
