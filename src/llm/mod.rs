//! Language-model access
//!
//! Defines the two capability traits the answer pipeline consumes, answer
//! generation and image understanding, plus the chat-completions client that
//! implements both against an OpenAI-compatible API.

pub mod client;

pub use client::LlmClient;

use async_trait::async_trait;

use crate::errors::Result;

/// Chat-completion capability used for answer generation
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a system + user exchange and return the model's text.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String>;
}

/// Image-understanding capability used to enrich a question with a textual
/// description of an attached image
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Describe an already-encoded image payload.
    async fn describe(&self, encoded_image: &str) -> Result<String>;
}
