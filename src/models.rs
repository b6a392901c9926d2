use serde::{Deserialize, Serialize};

/// Where indexed content was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Course,
    Forum,
}

impl Source {
    /// Provenance label prefixed to retrieved snippets in the prompt context.
    pub fn label(self) -> &'static str {
        match self {
            Source::Course => "Course Material",
            Source::Forum => "Forum Discussion",
        }
    }

    /// Placeholder link title used when a hit carries no title of its own.
    pub fn default_title(self) -> &'static str {
        match self {
            Source::Course => "Course Content",
            Source::Forum => "Forum Discussion",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Course => write!(f, "course"),
            Source::Forum => write!(f, "forum"),
        }
    }
}

/// A unit of indexed content: one course page or one forum post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub url: String,
    pub title: String,
    pub source: Source,
}

/// A single retrieval match, scoped to one request.
#[derive(Debug, Clone)]
pub struct RetrievedSnippet {
    pub text: String,
    pub url: String,
    pub title: String,
    pub source: Source,
}

impl RetrievedSnippet {
    /// Renders the snippet as a provenance-labeled context line.
    pub fn labeled(&self) -> String {
        format!("{}: {}", self.source.label(), self.text)
    }
}

/// A supporting link returned alongside an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub url: String,
    pub title: String,
}

/// Insertion-ordered map from canonical source URL to display title.
///
/// The first title seen for a URL wins; later inserts of the same URL are
/// ignored. Iteration order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    entries: Vec<SourceLink>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records a source link unless its URL is already present.
    pub fn insert(&mut self, url: impl Into<String>, title: impl Into<String>) {
        let url = url.into();
        if self.entries.iter().any(|link| link.url == url) {
            return;
        }
        self.entries.push(SourceLink {
            url,
            title: title.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source links in insertion order.
    pub fn links(&self) -> &[SourceLink] {
        &self.entries
    }

    /// Consumes the map, keeping at most `limit` links in insertion order.
    pub fn into_links(self, limit: usize) -> Vec<SourceLink> {
        let mut entries = self.entries;
        entries.truncate(limit);
        entries
    }
}

/// A completed answer with its supporting source links.
#[derive(Debug, Clone)]
pub struct AnswerResult {
    pub answer: String,
    pub links: Vec<SourceLink>,
}
