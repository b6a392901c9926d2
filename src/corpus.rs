//! Corpus file loading and startup indexing
//!
//! The two corpus files are produced by external scrape/merge tooling and
//! consumed here once at startup. Course pages arrive either as a bare array
//! or wrapped in a `pages` object, with `content` as plain text or a
//! `raw_text` object; forum topics carry their posts inline, each post
//! holding its text in one of several legacy field names.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::Document;
use crate::models::Source;
use crate::registry::SemanticIndex;

/// Minimum character count for course page content. Shorter pages are
/// near-empty scrape fragments and are excluded from indexing.
pub const MIN_COURSE_CONTENT_LEN: usize = 20;

/// Minimum character count for forum post content.
pub const MIN_FORUM_POST_LEN: usize = 25;

#[derive(Deserialize)]
#[serde(untagged)]
enum CourseFile {
    Wrapped { pages: Vec<CoursePage> },
    Bare(Vec<CoursePage>),
}

impl CourseFile {
    fn into_pages(self) -> Vec<CoursePage> {
        match self {
            CourseFile::Wrapped { pages } => pages,
            CourseFile::Bare(pages) => pages,
        }
    }
}

#[derive(Deserialize)]
struct CoursePage {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: CourseContent,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CourseContent {
    Structured {
        #[serde(default)]
        raw_text: String,
    },
    Text(String),
    Other(serde_json::Value),
}

impl Default for CourseContent {
    fn default() -> Self {
        CourseContent::Text(String::new())
    }
}

impl CourseContent {
    fn text(&self) -> &str {
        match self {
            CourseContent::Structured { raw_text } => raw_text,
            CourseContent::Text(text) => text,
            CourseContent::Other(_) => "",
        }
    }
}

#[derive(Deserialize)]
struct ForumFile {
    #[serde(default)]
    topics: Vec<ForumTopic>,
}

#[derive(Deserialize)]
struct ForumTopic {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    posts: Vec<ForumPost>,
}

#[derive(Deserialize)]
struct ForumPost {
    #[serde(default)]
    content_text: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl ForumPost {
    /// First non-empty of the known content field names.
    fn body(&self) -> &str {
        [&self.content_text, &self.content, &self.text]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|text| !text.is_empty())
            .unwrap_or("")
    }
}

/// Parse the course corpus, keeping pages that pass the quality filter
///
/// Document ids keep the page's position in the file (`course_{idx}`), so
/// ids stay stable when short pages are filtered out.
pub fn parse_course_corpus(raw: &str) -> Result<Vec<Document>> {
    let file: CourseFile = serde_json::from_str(raw)?;

    let documents = file
        .into_pages()
        .into_iter()
        .enumerate()
        .filter_map(|(idx, page)| {
            let content = page.content.text().trim();
            if content.chars().count() <= MIN_COURSE_CONTENT_LEN {
                return None;
            }
            Some(Document {
                id: format!("course_{idx}"),
                text: content.to_string(),
                url: page.url,
                title: page.title,
                source: Source::Course,
            })
        })
        .collect();

    Ok(documents)
}

/// Parse the forum corpus, keeping posts that pass the quality filter
///
/// Posts inherit their topic's URL and title; ids are
/// `forum_{topic_idx}_{post_idx}` over positions in the file.
pub fn parse_forum_corpus(raw: &str) -> Result<Vec<Document>> {
    let file: ForumFile = serde_json::from_str(raw)?;

    let mut documents = Vec::new();
    for (topic_idx, topic) in file.topics.into_iter().enumerate() {
        for (post_idx, post) in topic.posts.iter().enumerate() {
            let content = post.body().trim();
            if content.chars().count() <= MIN_FORUM_POST_LEN {
                continue;
            }
            documents.push(Document {
                id: format!("forum_{topic_idx}_{post_idx}"),
                text: content.to_string(),
                url: topic.url.clone(),
                title: topic.title.clone(),
                source: Source::Forum,
            });
        }
    }

    Ok(documents)
}

/// Read and parse the course corpus file
pub async fn load_course_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let raw = tokio::fs::read_to_string(path).await?;
    parse_course_corpus(&raw)
}

/// Read and parse the forum corpus file
pub async fn load_forum_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let raw = tokio::fs::read_to_string(path).await?;
    parse_forum_corpus(&raw)
}

/// Load both corpus files and bulk-load them into their registry collections
///
/// Returns the (course, forum) document counts. Any failure here is fatal to
/// startup; the service never starts with silently empty collections.
///
/// # Errors
/// - IO errors reading a corpus file
/// - Serialization errors for malformed corpus JSON
/// - Registry errors while bulk loading
pub async fn index_corpora(
    registry: &dyn SemanticIndex,
    config: &AppConfig,
) -> Result<(usize, usize)> {
    info!("Starting corpus indexing");

    let course_docs = load_course_corpus(&config.corpus.course_path).await?;
    let course_count = registry
        .bulk_load(config.course_collection(), &course_docs)
        .await?;
    info!("Indexed {course_count} course documents");

    let forum_docs = load_forum_corpus(&config.corpus.forum_path).await?;
    let forum_count = registry
        .bulk_load(config.forum_collection(), &forum_docs)
        .await?;
    info!("Indexed {forum_count} forum posts");

    info!("Corpus indexing completed successfully");
    Ok((course_count, forum_count))
}
