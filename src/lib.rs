// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns

//! Indexes newly uploaded PDF resumes: the object named by an S3 trigger is
//! downloaded, its pages are annotated with key phrases and named entities,
//! and one aggregated record is written to the search index.

pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod runtime;
pub mod search;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{AnnotationConfig, AwsConfig, Config, PipelineConfig, SearchConfig, StorageConfig};
pub use error::{PipelineError, Result};
pub use extractor::{Annotator, ComprehendAnnotator, ScoreFilter};
pub use models::{DetectedEntity, KeyPhrase, SearchDocument, TriggerEvent};
pub use parser::{PageTextNormalizer, PdfDocument, PdfExtractor};
pub use pipeline::{HandlerOutcome, InvocationStats, PipelineHandler, PipelineSettings};
pub use runtime::Services;
pub use search::{IndexReceipt, OpenSearchIndex, SearchIndex};
pub use storage::{DownloadedObject, ObjectStore, S3ObjectStore};
pub use utils::OperationTimer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _settings = PipelineSettings::default();
        let _normalizer = PageTextNormalizer::default();
    }
}
