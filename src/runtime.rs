// file: src/runtime.rs
// description: process-wide service handles and the function runtime loop
// reference: clients are built once per process and shared by every invocation

use crate::config::Config;
use crate::error::Result;
use crate::extractor::ComprehendAnnotator;
use crate::pipeline::{PipelineHandler, PipelineSettings};
use crate::search::{OpenSearchIndex, SearchIndex};
use crate::storage::{S3ObjectStore, effective_temp_dir};
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

const TASK_ROOT_ENV: &str = "LAMBDA_TASK_ROOT";

/// External-service handles shared across invocations. Credentials are
/// resolved by the SDK's default provider chain, which refreshes session
/// credentials on its own.
pub struct Services {
    store: Arc<S3ObjectStore>,
    annotator: Arc<ComprehendAnnotator>,
    index: Arc<OpenSearchIndex>,
    settings: PipelineSettings,
}

impl Services {
    pub async fn initialize(config: &Config) -> Result<Self> {
        if let Ok(task_root) = std::env::var(TASK_ROOT_ENV) {
            info!(task_root = %task_root, "Running inside function runtime");
        }

        let sdk_config = load_sdk_config(config).await;
        info!(region = %config.aws.region, "Loaded AWS configuration");

        let temp_dir = config.storage.temp_dir.clone();
        info!(
            temp_dir = %effective_temp_dir(temp_dir.as_deref()).display(),
            "Downloads will be staged locally"
        );
        let store = S3ObjectStore::new(aws_sdk_s3::Client::new(&sdk_config), temp_dir);

        let annotator = ComprehendAnnotator::new(aws_sdk_comprehend::Client::new(&sdk_config));

        let index = OpenSearchIndex::new(
            &config.search.endpoint(),
            &config.search.index_name,
            &config.search.service_name,
            &sdk_config,
        )?;

        Ok(Self {
            store: Arc::new(store),
            annotator: Arc::new(annotator),
            index: Arc::new(index),
            settings: PipelineSettings::from(config),
        })
    }

    pub fn handler(&self) -> PipelineHandler {
        PipelineHandler::new(
            self.store.clone(),
            self.annotator.clone(),
            self.index.clone(),
            self.settings.clone(),
        )
    }

    pub async fn search_health(&self) -> Result<bool> {
        self.index.health_check().await
    }
}

async fn load_sdk_config(config: &Config) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws.region.clone()))
        .retry_config(RetryConfig::standard().with_max_attempts(config.aws.max_attempts))
        .load()
        .await
}

/// Serves invocations until the runtime shuts the process down. Each event
/// yields the confirmation string or an error the runtime records as failed.
pub async fn serve(handler: PipelineHandler) -> std::result::Result<(), lambda_runtime::Error> {
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        info!(request_id = %event.context.request_id, "Invocation started");
        let outcome = handler.handle(&event.payload).await?;
        Ok::<String, lambda_runtime::Error>(outcome.message().to_string())
    }))
    .await
}
