// file: src/models/event.rs
// description: S3 object-created notification parsing into a trigger event
// reference: https://docs.aws.amazon.com/AmazonS3/latest/userguide/notification-content-structure.html

use crate::error::{PipelineError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Identifies the object whose creation triggered an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Deserialize)]
struct Notification {
    #[serde(rename = "Records", default)]
    records: Vec<NotificationRecord>,
}

#[derive(Debug, Deserialize)]
struct NotificationRecord {
    s3: Option<S3Entity>,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: Option<BucketEntity>,
    object: Option<ObjectEntity>,
}

#[derive(Debug, Deserialize)]
struct BucketEntity {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectEntity {
    key: Option<String>,
}

impl TriggerEvent {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Reads bucket and key from the first record. The key arrives
    /// form-encoded and is decoded here.
    pub fn from_value(payload: &Value) -> Result<Self> {
        let notification = Notification::deserialize(payload)
            .map_err(|e| PipelineError::malformed_event(e.to_string()))?;

        let s3 = notification
            .records
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::malformed_event("event has no Records"))?
            .s3
            .ok_or_else(|| PipelineError::malformed_event("Records[0].s3 is missing"))?;

        let bucket = s3
            .bucket
            .and_then(|b| b.name)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| PipelineError::malformed_event("Records[0].s3.bucket.name is missing"))?;

        let raw_key = s3
            .object
            .and_then(|o| o.key)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PipelineError::malformed_event("Records[0].s3.object.key is missing"))?;

        let key = decode_object_key(&raw_key)?;

        Ok(Self { bucket, key })
    }
}

/// Form-style decoding: `+` becomes a space before `%XX` sequences are resolved.
pub fn decode_object_key(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| PipelineError::malformed_event(format!("object key is not valid UTF-8: {}", e)))
}
