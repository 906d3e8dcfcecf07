// file: src/storage/s3.rs
// description: S3 object download streamed into a scoped temporary file
// reference: https://docs.rs/aws-sdk-s3

use crate::error::{PipelineError, Result};
use crate::storage::{DownloadedObject, ObjectStore, create_temp_file};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

pub struct S3ObjectStore {
    client: Client,
    temp_dir: Option<PathBuf>,
}

impl S3ObjectStore {
    pub fn new(client: Client, temp_dir: Option<PathBuf>) -> Self {
        Self { client, temp_dir }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn download(&self, bucket: &str, key: &str) -> Result<DownloadedObject> {
        debug!(bucket = %bucket, key = %key, "Requesting object");

        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let missing = e
                    .as_service_error()
                    .map(|service| service.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    PipelineError::storage(bucket, key, "object does not exist")
                } else {
                    PipelineError::storage(bucket, key, DisplayErrorContext(&e).to_string())
                }
            })?;

        let temp = create_temp_file(self.temp_dir.as_deref())?;
        let mut writer = tokio::fs::File::from_std(temp.as_file().try_clone()?);
        let mut body = output.body;
        let mut written: u64 = 0;

        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| PipelineError::storage(bucket, key, e.to_string()))?
        {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;

        info!(
            bucket = %bucket,
            key = %key,
            bytes = written,
            path = %temp.path().display(),
            "Object downloaded"
        );

        Ok(DownloadedObject::new(temp, written))
    }
}
