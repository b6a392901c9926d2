//! Context assembly from retrieved snippets

use crate::models::RetrievedSnippet;

/// Fallback sentence used when retrieval produced nothing.
///
/// It is embedded verbatim in the model prompt so the model is told explicitly
/// that context is absent instead of being handed an empty string.
pub const NO_CONTEXT_FALLBACK: &str = "No relevant context found.";

/// Assembler for merging retrieved snippets into a single prompt section
pub struct ContextAssembler;

impl ContextAssembler {
    /// Create a new context assembler
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Assemble the context block from retrieved snippets
    ///
    /// Snippets are rendered as provenance-labeled lines and joined in order
    /// with newline separators. An empty slice yields [`NO_CONTEXT_FALLBACK`].
    #[must_use]
    pub fn assemble(&self, snippets: &[RetrievedSnippet]) -> String {
        if snippets.is_empty() {
            return NO_CONTEXT_FALLBACK.to_string();
        }

        snippets
            .iter()
            .map(RetrievedSnippet::labeled)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new()
    }
}
