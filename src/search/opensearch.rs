// file: src/search/opensearch.rs
// description: SigV4-signed OpenSearch client writing search documents
// reference: https://docs.rs/opensearch

use crate::error::{PipelineError, Result};
use crate::models::SearchDocument;
use crate::search::{IndexReceipt, SearchIndex};
use async_trait::async_trait;
use aws_config::SdkConfig;
use opensearch::auth::Credentials;
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::{IndexParts, OpenSearch};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

/// OpenSearch (or Elasticsearch-compatible) domain reached over HTTPS with
/// requests signed from the process-wide AWS credentials.
pub struct OpenSearchIndex {
    client: OpenSearch,
    index_name: String,
}

impl OpenSearchIndex {
    /// Builds the transport. No request is sent until the first call.
    pub fn new(
        endpoint: &str,
        index_name: &str,
        service_name: &str,
        sdk_config: &SdkConfig,
    ) -> Result<Self> {
        let url = Url::parse(endpoint).map_err(|e| {
            PipelineError::index_connection(format!("invalid endpoint {}: {}", endpoint, e))
        })?;

        let credentials = Credentials::try_from(sdk_config.clone())
            .map_err(|e| PipelineError::index_connection(e.to_string()))?;

        let transport = TransportBuilder::new(SingleNodeConnectionPool::new(url))
            .auth(credentials)
            .service_name(service_name)
            .build()
            .map_err(|e| PipelineError::index_connection(e.to_string()))?;

        info!(
            endpoint = %endpoint,
            index = %index_name,
            service = %service_name,
            "Created OpenSearch client"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
            index_name: index_name.to_string(),
        })
    }
}

/// Authentication and authorization failures mean the cluster could not be
/// reached as this principal; anything else is a rejected write.
pub(crate) fn classify_failure(status: u16, body: &str) -> PipelineError {
    match status {
        401 | 403 => PipelineError::index_connection(format!(
            "request was not authorized (status {}): {}",
            status, body
        )),
        _ => PipelineError::index_write(format!(
            "index request failed with status {}: {}",
            status, body
        )),
    }
}

pub(crate) fn parse_receipt(index_name: &str, body: &Value) -> Result<IndexReceipt> {
    let document_id = body
        .get("_id")
        .and_then(Value::as_str)
        .ok_or_else(|| PipelineError::index_write("response did not include a document _id"))?;

    Ok(IndexReceipt {
        index: body
            .get("_index")
            .and_then(Value::as_str)
            .unwrap_or(index_name)
            .to_string(),
        document_id: document_id.to_string(),
        result: body
            .get("result")
            .and_then(Value::as_str)
            .unwrap_or("created")
            .to_string(),
    })
}

#[async_trait]
impl SearchIndex for OpenSearchIndex {
    async fn index_document(&self, document: &SearchDocument) -> Result<IndexReceipt> {
        debug!(index = %self.index_name, pages = document.page_count(), "Indexing document");

        let response = self
            .client
            .index(IndexParts::Index(&self.index_name))
            .body(document)
            .send()
            .await
            .map_err(|e| PipelineError::index_connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Index request failed");
            return Err(classify_failure(status.as_u16(), &body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PipelineError::index_write(format!("unreadable response: {}", e)))?;

        let receipt = parse_receipt(&self.index_name, &body)?;
        info!(
            index = %receipt.index,
            document_id = %receipt.document_id,
            "Data uploaded to search index"
        );
        Ok(receipt)
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| PipelineError::index_connection(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(classify_failure(status.as_u16(), "ping rejected"));
        }
        Ok(status.is_success())
    }
}
