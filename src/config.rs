// file: src/config.rs
// description: application configuration management with toml and environment support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable the deployment template uses for the search domain host.
pub const SEARCH_DOMAIN_ENV: &str = "esDomain";

const ENV_PREFIX: &str = "RESUME_INDEXER";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub aws: AwsConfig,
    pub storage: StorageConfig,
    pub annotation: AnnotationConfig,
    pub search: SearchConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AwsConfig {
    pub region: String,
    /// Total attempts per S3/Comprehend call, including the first one.
    pub max_attempts: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnnotationConfig {
    pub language_code: String,
    /// Inclusive threshold on the 0-100 scale.
    pub min_score: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub host: String,
    pub port: u16,
    pub index_name: String,
    pub service_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub max_page_bytes: usize,
    pub annotate_empty_pages: bool,
    pub console_region: String,
}

impl SearchConfig {
    pub fn endpoint(&self) -> String {
        format!("https://{}:{}", self.host, self.port)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PipelineError::config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("search.host", std::env::var(SEARCH_DOMAIN_ENV).ok())
            .map_err(|e| PipelineError::config(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| PipelineError::config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            aws: AwsConfig {
                region: "us-east-1".to_string(),
                max_attempts: 3,
            },
            storage: StorageConfig { temp_dir: None },
            annotation: AnnotationConfig {
                language_code: "en".to_string(),
                min_score: 90.0,
            },
            search: SearchConfig {
                host: String::new(),
                port: 443,
                index_name: "resume".to_string(),
                service_name: "es".to_string(),
            },
            pipeline: PipelineConfig {
                max_page_bytes: 5000,
                annotate_empty_pages: true,
                console_region: "us-east-1".to_string(),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.host.trim().is_empty() {
            return Err(PipelineError::config(format!(
                "search.host must be set (or provide the {} environment variable)",
                SEARCH_DOMAIN_ENV
            )));
        }

        if self.search.port == 0 {
            return Err(PipelineError::config("search.port must be greater than 0"));
        }

        if self.search.index_name.is_empty() {
            return Err(PipelineError::config("search.index_name must not be empty"));
        }

        if self.pipeline.max_page_bytes == 0 {
            return Err(PipelineError::config(
                "pipeline.max_page_bytes must be greater than 0",
            ));
        }

        if !(0.0..=100.0).contains(&self.annotation.min_score) {
            return Err(PipelineError::config(
                "annotation.min_score must be within 0..=100",
            ));
        }

        if self.aws.max_attempts == 0 {
            return Err(PipelineError::config(
                "aws.max_attempts must be greater than 0",
            ));
        }

        Ok(())
    }
}
