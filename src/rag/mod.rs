//! RAG (Retrieval-Augmented Generation) module
//!
//! This module provides end-to-end question answering over the indexed
//! course corpora:
//! - Canonical topic URLs for forum sources
//! - Two-collection semantic retrieval with provenance labels
//! - Context assembly with an explicit empty-context fallback
//! - Grounded answer generation with deduplicated source links
//!
//! # Examples
//!
//! ```rust,no_run
//! use vta::config::AppConfig;
//! use vta::rag::AnswerService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = AnswerService::new(&config)?;
//!
//!     let result = service
//!         .answer("What package manager should I use?", None)
//!         .await?;
//!     println!("Answer: {}", result.answer);
//!     println!("Sources: {} links", result.links.len());
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod pipeline;
pub mod retriever;
pub mod url;

pub use context::ContextAssembler;
pub use context::NO_CONTEXT_FALLBACK;
pub use pipeline::AnswerService;
pub use pipeline::MAX_ANSWER_LINKS;
pub use retriever::ContextRetriever;
pub use url::canonicalize_topic_url;
