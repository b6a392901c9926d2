//! Shared test fakes and helpers
//!
//! The fakes implement the collaborator traits in memory so the retrieval
//! and answer pipeline can be exercised without a running registry or model
//! endpoint.


use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::errors::VtaError;
use crate::llm::ImageAnalyzer;
use crate::llm::LanguageModel;
use crate::models::Document;
use crate::registry::RegistryHit;
use crate::registry::SemanticIndex;

/// Test configuration with default collections and a placeholder key
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.llm.api_key = "test-key".to_string();
    config
}

/// Shorthand for a registry hit
pub fn hit(text: &str, url: &str, title: &str) -> RegistryHit {
    RegistryHit {
        text: text.to_string(),
        url: url.to_string(),
        title: title.to_string(),
    }
}

/// In-memory registry with per-collection canned results
///
/// Collections marked as failing return an error from every operation,
/// which is how tests exercise the degradation paths.
#[derive(Default)]
pub struct FakeIndex {
    collections: Mutex<HashMap<String, Vec<RegistryHit>>>,
    failing: Mutex<HashSet<String>>,
    loaded: Mutex<HashMap<String, Vec<Document>>>,
}

impl FakeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed canned query results for a collection
    pub fn seed(&self, collection: &str, hits: Vec<RegistryHit>) {
        self.collections
            .lock()
            .unwrap()
            .insert(collection.to_string(), hits);
    }

    /// Make every operation on a collection fail
    pub fn fail(&self, collection: &str) {
        self.failing.lock().unwrap().insert(collection.to_string());
    }

    /// Number of documents bulk-loaded into a collection
    pub fn loaded_count(&self, collection: &str) -> usize {
        self.loaded
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn check_available(&self, collection: &str) -> Result<()> {
        if self.failing.lock().unwrap().contains(collection) {
            return Err(VtaError::RegistryError(format!(
                "collection '{collection}' unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SemanticIndex for FakeIndex {
    async fn query(&self, collection: &str, _query: &str, top_k: usize) -> Result<Vec<RegistryHit>> {
        self.check_available(collection)?;
        let mut hits = self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default();
        hits.truncate(top_k);
        Ok(hits)
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        self.check_available(collection)?;
        Ok(self.loaded_count(collection) as u64)
    }

    async fn bulk_load(&self, collection: &str, documents: &[Document]) -> Result<usize> {
        self.check_available(collection)?;
        let mut loaded = self.loaded.lock().unwrap();
        let entry = loaded.entry(collection.to_string()).or_default();
        entry.extend_from_slice(documents);
        Ok(documents.len())
    }
}

/// Language model that records prompts and returns a canned answer
pub struct FakeModel {
    answer: String,
    fail: bool,
    prompts: Mutex<Vec<(String, String)>>,
}

impl FakeModel {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            fail: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: String::new(),
            fail: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Recorded (system, user) prompt pairs
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        if self.fail {
            return Err(VtaError::LlmError("model offline".to_string()));
        }
        Ok(self.answer.clone())
    }
}

/// Image analyzer returning a fixed description, or failing
pub struct FakeVision {
    description: Option<String>,
}

impl FakeVision {
    pub fn describing(text: &str) -> Self {
        Self {
            description: Some(text.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { description: None }
    }
}

#[async_trait]
impl ImageAnalyzer for FakeVision {
    async fn describe(&self, _encoded_image: &str) -> Result<String> {
        match &self.description {
            Some(text) => Ok(text.clone()),
            None => Err(VtaError::LlmError("vision model offline".to_string())),
        }
    }
}
