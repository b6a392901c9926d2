//! Two-collection context retrieval

use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::config::RegistryConfig;
use crate::errors::Result;
use crate::models::RetrievedSnippet;
use crate::models::Source;
use crate::models::SourceMap;
use crate::rag::url::canonicalize_topic_url;
use crate::registry::RegistryHit;
use crate::registry::SemanticIndex;

/// Retriever that fans a question out to the forum and course collections
pub struct ContextRetriever {
    registry: Arc<dyn SemanticIndex>,
    forum_collection: String,
    course_collection: String,
    max_per_collection: usize,
}

impl ContextRetriever {
    /// Create a new context retriever
    pub fn new(registry: Arc<dyn SemanticIndex>, config: &RegistryConfig) -> Self {
        Self {
            registry,
            forum_collection: config.forum_collection.clone(),
            course_collection: config.course_collection.clone(),
            max_per_collection: config.max_per_collection,
        }
    }

    /// Retrieve labeled context snippets and deduplicated source links
    ///
    /// Uses the configured per-collection limit. See [`Self::retrieve_with_limit`].
    pub async fn retrieve(&self, query: &str) -> (Vec<RetrievedSnippet>, SourceMap) {
        self.retrieve_with_limit(query, self.max_per_collection)
            .await
    }

    /// Retrieve with an explicit per-collection limit
    ///
    /// Both collections are queried concurrently and the results folded in
    /// fixed order, forum first, then course-site. A failing collection is
    /// logged and skipped, so retrieval itself never fails; on total failure
    /// the result is simply empty. At most `2 * max_per_collection` snippets
    /// are returned.
    pub async fn retrieve_with_limit(
        &self,
        query: &str,
        max_per_collection: usize,
    ) -> (Vec<RetrievedSnippet>, SourceMap) {
        debug!("Retrieving context: max_per_collection={max_per_collection}");

        let (forum, course) = tokio::join!(
            self.registry
                .query(&self.forum_collection, query, max_per_collection),
            self.registry
                .query(&self.course_collection, query, max_per_collection),
        );

        let mut snippets = Vec::new();
        let mut sources = SourceMap::new();

        self.fold_collection(
            Source::Forum,
            &self.forum_collection,
            forum,
            max_per_collection,
            &mut snippets,
            &mut sources,
        );
        self.fold_collection(
            Source::Course,
            &self.course_collection,
            course,
            max_per_collection,
            &mut snippets,
            &mut sources,
        );

        debug!(
            "Retrieved {} snippets, {} sources",
            snippets.len(),
            sources.len()
        );

        (snippets, sources)
    }

    /// Fold one collection's query result into the combined output
    ///
    /// Successes are appended in relevance order; a failure is logged with
    /// its collection name and contributes nothing. Forum URLs are collapsed
    /// to their canonical topic form before source insertion; course URLs are
    /// already page-granular and inserted as-is.
    fn fold_collection(
        &self,
        source: Source,
        collection: &str,
        result: Result<Vec<RegistryHit>>,
        limit: usize,
        snippets: &mut Vec<RetrievedSnippet>,
        sources: &mut SourceMap,
    ) {
        let hits = match result {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Skipping collection '{collection}': query failed: {e}");
                return;
            }
        };

        for hit in hits.into_iter().take(limit) {
            if !hit.url.is_empty() {
                let url = match source {
                    Source::Forum => canonicalize_topic_url(&hit.url),
                    Source::Course => hit.url.clone(),
                };
                let title = if hit.title.is_empty() {
                    source.default_title().to_string()
                } else {
                    hit.title.clone()
                };
                sources.insert(url, title);
            }

            snippets.push(RetrievedSnippet {
                text: hit.text,
                url: hit.url,
                title: hit.title,
                source,
            });
        }
    }
}
