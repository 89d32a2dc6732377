//! Post model

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::path::PathBuf;

use super::FrontMatter;

/// A blog post, local or mirrored from Velog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Identifier unique within the aggregated collection
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date as written in the source
    pub published_at: String,

    /// Publication date used for ordering
    #[serde(skip)]
    pub date: DateTime<FixedOffset>,

    /// Short description, may be empty
    pub summary: String,

    /// Cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Post tags
    pub tags: Vec<String>,

    /// Raw MDX body
    pub content: String,

    /// Whether the post originates from Velog
    pub is_velog_post: bool,

    /// Canonical Velog URL, present for Velog posts only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velog_url: Option<String>,

    /// Source document, if the post was read from disk
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Post {
    /// Build a post from parsed front-matter.
    ///
    /// Returns `None` when the title is missing or blank, or when
    /// `publishedAt` cannot be parsed.
    pub fn from_front_matter(slug: String, fm: FrontMatter, content: String) -> Option<Self> {
        let title = fm.title.filter(|t| !t.trim().is_empty())?;
        let published_at = fm.published_at?;
        let date = parse_date_string(&published_at)?;

        Some(Self {
            slug,
            title,
            published_at,
            date,
            summary: fm.summary.unwrap_or_default(),
            image: fm.image.filter(|i| !i.is_empty()),
            tags: fm.tags.unwrap_or_default(),
            content,
            is_velog_post: false,
            velog_url: None,
            source: None,
        })
    }
}

/// Parse a publication date: a calendar date or an ISO 8601 date-time.
///
/// Values without an offset are taken as UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let utc = |naive: NaiveDateTime| naive.and_utc().fixed_offset();

    let formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(utc(dt));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_matter(title: &str, published_at: &str) -> FrontMatter {
        FrontMatter {
            title: Some(title.to_string()),
            published_at: Some(published_at.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let date = parse_date_string("2024-01-15").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-01-15T00:00:00+00:00");

        let date = parse_date_string("2023-05-01T12:34:56.789Z").unwrap();
        assert_eq!(date.format("%Y-%m-%d %H:%M").to_string(), "2023-05-01 12:34");

        let date = parse_date_string("2023-05-01T09:00:00+09:00").unwrap();
        assert_eq!(date.with_timezone(&chrono::Utc).format("%H").to_string(), "00");

        assert!(parse_date_string("2024-01-15T10:30").is_some());
        assert!(parse_date_string("yesterday").is_none());
    }

    #[test]
    fn test_from_front_matter() {
        let mut fm = front_matter("Hello", "2024-01-15");
        fm.tags = Some(vec!["rust".to_string()]);
        fm.image = Some(String::new());

        let post = Post::from_front_matter("hello".to_string(), fm, "Body".to_string()).unwrap();
        assert_eq!(post.slug, "hello");
        assert_eq!(post.summary, "");
        assert_eq!(post.image, None);
        assert_eq!(post.tags, vec!["rust"]);
        assert!(!post.is_velog_post);
    }

    #[test]
    fn test_from_front_matter_requires_title_and_date() {
        let post = Post::from_front_matter("a".into(), front_matter("  ", "2024-01-15"), String::new());
        assert!(post.is_none());

        let post = Post::from_front_matter("a".into(), front_matter("A", "soon"), String::new());
        assert!(post.is_none());

        let fm = FrontMatter {
            title: Some("No date".to_string()),
            ..Default::default()
        };
        assert!(Post::from_front_matter("a".into(), fm, String::new()).is_none());
    }

    #[test]
    fn test_serialize_camel_case() {
        let post = Post::from_front_matter(
            "hello".to_string(),
            front_matter("Hello", "2024-01-15"),
            String::new(),
        )
        .unwrap();

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["publishedAt"], "2024-01-15");
        assert_eq!(json["isVelogPost"], false);
        assert!(json.get("velogUrl").is_none());
        assert!(json.get("date").is_none());
    }
}
