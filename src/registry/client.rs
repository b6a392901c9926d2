//! HTTP client for the Source Registry API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::errors::Result;
use crate::errors::VtaError;
use crate::models::Document;
use crate::registry::RegistryHit;
use crate::registry::SemanticIndex;

/// Documents are uploaded in fixed-size batches to stay under registry
/// request-size limits.
pub const BULK_LOAD_BATCH_SIZE: usize = 100;

/// Client for the Source Registry HTTP API
pub struct RegistryClient {
    client: Client,
    endpoint: String,
}

impl RegistryClient {
    /// Create a new registry client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VtaError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SemanticIndex for RegistryClient {
    async fn query(
        &self,
        collection: &str,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RegistryHit>> {
        #[derive(Serialize)]
        struct QueryRequest<'a> {
            query: &'a str,
            top_k: usize,
        }

        #[derive(Deserialize)]
        struct QueryResponse {
            results: Vec<RegistryHit>,
        }

        let url = format!("{}/collections/{}/query", self.endpoint, collection);
        debug!("Querying registry collection {collection}: top_k={top_k}");

        let request = QueryRequest { query, top_k };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| VtaError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VtaError::RegistryError(format!(
                "Query on '{collection}' failed ({status}): {error_text}"
            )));
        }

        let result: QueryResponse = response
            .json()
            .await
            .map_err(|e| VtaError::RegistryError(format!("Failed to parse response: {e}")))?;

        Ok(result.results)
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        #[derive(Deserialize)]
        struct CountResponse {
            count: u64,
        }

        let url = format!("{}/collections/{}/count", self.endpoint, collection);
        debug!("Counting registry collection {collection}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| VtaError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VtaError::RegistryError(format!(
                "Count on '{collection}' failed ({status}): {error_text}"
            )));
        }

        let result: CountResponse = response
            .json()
            .await
            .map_err(|e| VtaError::RegistryError(format!("Failed to parse response: {e}")))?;

        Ok(result.count)
    }

    async fn bulk_load(&self, collection: &str, documents: &[Document]) -> Result<usize> {
        #[derive(Serialize)]
        struct LoadRequest<'a> {
            documents: &'a [Document],
        }

        #[derive(Deserialize)]
        struct LoadResponse {
            indexed: usize,
        }

        let url = format!("{}/collections/{}/documents", self.endpoint, collection);
        let mut total = 0;

        for batch in documents.chunks(BULK_LOAD_BATCH_SIZE) {
            debug!(
                "Uploading batch of {} documents to {collection}",
                batch.len()
            );

            let request = LoadRequest { documents: batch };

            let response = self
                .client
                .post(&url)
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(|e| VtaError::HttpError(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(VtaError::RegistryError(format!(
                    "Bulk load into '{collection}' failed ({status}): {error_text}"
                )));
            }

            let result: LoadResponse = response
                .json()
                .await
                .map_err(|e| VtaError::RegistryError(format!("Failed to parse response: {e}")))?;

            total += result.indexed;
        }

        debug!("Bulk loaded {total} documents into {collection}");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;

    #[tokio::test]
    #[ignore = "Requires a running Source Registry"]
    async fn test_registry_round_trip() {
        let config = RegistryConfig::default();
        let client = RegistryClient::new(&config).unwrap();

        let count = client.count("forum_posts").await.unwrap();
        assert!(count > 0);

        let hits = client
            .query("forum_posts", "package manager", 3)
            .await
            .unwrap();
        assert!(hits.len() <= 3);
    }
}
