// file: src/storage/mod.rs
// description: object storage abstraction and scoped local copies of downloaded objects
// reference: internal module structure

pub mod s3;

pub use s3::S3ObjectStore;

use crate::error::Result;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Fetches an object into a local file owned by the caller.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn download(&self, bucket: &str, key: &str) -> Result<DownloadedObject>;
}

/// A downloaded object held in a temporary file. The file is removed when
/// this value is dropped, whichever way the invocation ends.
#[derive(Debug)]
pub struct DownloadedObject {
    file: NamedTempFile,
    len: u64,
}

impl DownloadedObject {
    pub(crate) fn new(file: NamedTempFile, len: u64) -> Self {
        Self { file, len }
    }

    /// Writes `bytes` into a fresh temporary file under `temp_dir`, or the
    /// system temp directory when none is given.
    pub fn from_bytes(bytes: &[u8], temp_dir: Option<&Path>) -> Result<Self> {
        let mut file = create_temp_file(temp_dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self::new(file, bytes.len() as u64))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub(crate) fn create_temp_file(temp_dir: Option<&Path>) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("resume-indexer-").suffix(".pdf");

    let file = match temp_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    Ok(file)
}

/// Resolved temp directory for diagnostics.
pub fn effective_temp_dir(temp_dir: Option<&Path>) -> PathBuf {
    temp_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(std::env::temp_dir)
}
