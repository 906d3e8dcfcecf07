// file: src/extractor/mod.rs
// description: annotation module exports
// reference: internal module structure

pub mod annotator;
pub mod comprehend;
pub mod filter;

pub use annotator::Annotator;
pub use comprehend::ComprehendAnnotator;
pub use filter::{FilterOutcome, ScoreFilter};
