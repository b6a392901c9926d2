//! Source Registry access
//!
//! The registry is the external service holding the two indexed document
//! collections and exposing semantic nearest-neighbor search over them. This
//! module defines the capability trait the pipeline consumes plus the HTTP
//! client implementation; the registry's internal indexing is not
//! re-implemented here.

pub mod client;

pub use client::RegistryClient;

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::Result;
use crate::models::Document;

/// One relevance-ranked match returned by a collection query
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryHit {
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

/// Semantic nearest-neighbor access to named document collections
#[async_trait]
pub trait SemanticIndex: Send + Sync {
    /// Query a collection, returning up to `top_k` hits in relevance order.
    async fn query(&self, collection: &str, query: &str, top_k: usize)
        -> Result<Vec<RegistryHit>>;

    /// Number of documents currently indexed in a collection.
    async fn count(&self, collection: &str) -> Result<u64>;

    /// Index a batch of documents into a collection, returning how many were
    /// accepted.
    async fn bulk_load(&self, collection: &str, documents: &[Document]) -> Result<usize>;
}
