// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Malformed trigger event: {0}")]
    MalformedEvent(String),

    #[error("Storage access failed for s3://{bucket}/{key}: {message}")]
    StorageAccess {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("Document format error: {0}")]
    DocumentFormat(String),

    #[error("Annotation service error: {0}")]
    AnnotationService(String),

    #[error("Search index connection error: {0}")]
    IndexConnection(String),

    #[error("Search index write rejected: {0}")]
    IndexWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn malformed_event(msg: impl Into<String>) -> Self {
        Self::MalformedEvent(msg.into())
    }

    pub fn storage(bucket: &str, key: &str, msg: impl Into<String>) -> Self {
        Self::StorageAccess {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: msg.into(),
        }
    }

    pub fn document_format(msg: impl Into<String>) -> Self {
        Self::DocumentFormat(msg.into())
    }

    pub fn annotation(msg: impl Into<String>) -> Self {
        Self::AnnotationService(msg.into())
    }

    pub fn index_connection(msg: impl Into<String>) -> Self {
        Self::IndexConnection(msg.into())
    }

    pub fn index_write(msg: impl Into<String>) -> Self {
        Self::IndexWrite(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable label used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedEvent(_) => "malformed_event",
            Self::StorageAccess { .. } => "storage_access",
            Self::DocumentFormat(_) => "document_format",
            Self::AnnotationService(_) => "annotation_service",
            Self::IndexConnection(_) => "index_connection",
            Self::IndexWrite(_) => "index_write",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = PipelineError::storage("resumes", "cv.pdf", "NoSuchKey");
        assert_eq!(
            err.to_string(),
            "Storage access failed for s3://resumes/cv.pdf: NoSuchKey"
        );
        assert_eq!(err.kind(), "storage_access");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PipelineError = io.into();
        assert_eq!(err.kind(), "io");
    }
}
