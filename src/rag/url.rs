//! Canonical topic form for forum post URLs

/// Reduces a forum post URL to its thread-level canonical form.
///
/// Scraped forum URLs address individual posts (`.../t/<slug>/<topic-id>/<post-no>`,
/// sometimes with a `/0` artifact from a zero-based post index). Collapsing them
/// to the topic URL lets every post in a thread dedup to one source link.
///
/// The reduction is:
/// 1. strip a literal trailing `/0`;
/// 2. drop a final all-numeric segment when the URL still has at least six
///    non-empty segments (a post sequence number after the topic id).
///
/// Empty or malformed input passes through unchanged. The function is pure and
/// idempotent over the forum URL scheme.
pub fn canonicalize_topic_url(raw: &str) -> String {
    let trimmed = raw.strip_suffix("/0").unwrap_or(raw);

    let parts: Vec<&str> = trimmed.split('/').collect();
    let segment_count = parts.iter().filter(|part| !part.is_empty()).count();

    match parts.last() {
        Some(last)
            if segment_count >= 6
                && !last.is_empty()
                && last.bytes().all(|b| b.is_ascii_digit()) =>
        {
            parts[..parts.len() - 1].join("/")
        }
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::canonicalize_topic_url;

    const TOPIC: &str = "https://discourse.example.edu/t/topic-slug/12345";

    #[test]
    fn test_strips_post_number() {
        let post = format!("{TOPIC}/7");
        assert_eq!(canonicalize_topic_url(&post), TOPIC);
    }

    #[test]
    fn test_strips_zero_artifact() {
        let post = format!("{TOPIC}/0");
        assert_eq!(canonicalize_topic_url(&post), TOPIC);
    }

    #[test]
    fn test_topic_url_unchanged() {
        assert_eq!(canonicalize_topic_url(TOPIC), TOPIC);
    }

    #[test]
    fn test_idempotent_over_forum_scheme() {
        let inputs = [
            format!("{TOPIC}/7"),
            format!("{TOPIC}/0"),
            format!("{TOPIC}/142"),
            TOPIC.to_string(),
        ];
        for input in inputs {
            let once = canonicalize_topic_url(&input);
            let twice = canonicalize_topic_url(&once);
            assert_eq!(twice, once, "not idempotent for {input}");
        }
    }

    #[test]
    fn test_empty_input_passes_through() {
        assert_eq!(canonicalize_topic_url(""), "");
    }

    #[test]
    fn test_malformed_input_passes_through() {
        assert_eq!(canonicalize_topic_url("not a url"), "not a url");
        assert_eq!(canonicalize_topic_url("/t/x/1"), "/t/x/1");
    }

    #[test]
    fn test_non_numeric_tail_unchanged() {
        let url = "https://discourse.example.edu/t/topic-slug/12345/reply";
        assert_eq!(canonicalize_topic_url(url), url);
    }

    #[test]
    fn test_trailing_slash_unchanged() {
        let url = "https://discourse.example.edu/t/topic-slug/12345/7/";
        assert_eq!(canonicalize_topic_url(url), url);
    }

    #[test]
    fn test_course_page_urls_unchanged() {
        let url = "https://course.example.edu/docs/development-tools";
        assert_eq!(canonicalize_topic_url(url), url);
    }
}
