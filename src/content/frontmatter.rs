//! Front-matter parsing and rendering
//!
//! Posts use a deliberately small dialect instead of full YAML: one
//! `key: value` pair per line between two `---` lines, with optional quoting
//! and a JSON array for `tags`.
//!
//! A double-quoted value is read as a JSON string when it is a valid one, so
//! `\n`, `\"` and `\\` inside double quotes are escapes. Write a literal
//! backslash as `\\`, or use single quotes, which are never decoded.

use indexmap::IndexMap;
use std::fmt::Write as _;
use thiserror::Error;

/// Line that opens and closes the front-matter block
pub const DELIMITER: &str = "---";

/// Front-matter errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrontMatterError {
    #[error("no front-matter block found")]
    MissingBlock,

    #[error("front-matter block opened at line {0} is never closed")]
    Unclosed(usize),
}

/// Front-matter data from a post document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub published_at: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub velog_url: Option<String>,

    /// Keys this dialect does not know about, in document order
    pub extra: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, String), FrontMatterError> {
        let (header, before, after) = split_block(content)?;

        let mut fm = FrontMatter::default();
        for line in header.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let (key, raw) = match line.split_once(": ") {
                Some((key, raw)) => (key.trim(), raw.trim()),
                None => (line.trim(), ""),
            };
            fm.set(key, raw);
        }

        let body = if before.trim().is_empty() {
            after.trim().to_string()
        } else {
            format!("{}{}", before, after).trim().to_string()
        };

        Ok((fm, body))
    }

    /// Assign a raw header value; later keys overwrite earlier ones
    fn set(&mut self, key: &str, raw: &str) {
        let value = unquote(raw);
        match key {
            "tags" => {
                let tags = serde_json::from_str::<Vec<String>>(&value).unwrap_or_else(|e| {
                    tracing::debug!("Ignoring malformed tags {:?}: {}", raw, e);
                    Vec::new()
                });
                self.tags = Some(tags);
            }
            "title" => self.title = Some(value),
            "publishedAt" => self.published_at = Some(value),
            "summary" => self.summary = Some(value),
            "image" => self.image = Some(value),
            "velogUrl" => self.velog_url = Some(value),
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    /// Render the front-matter block followed by `body`.
    ///
    /// Free-text fields are written as JSON strings so that any quotes or
    /// newlines they contain survive [`FrontMatter::parse`].
    pub fn render(&self, body: &str) -> String {
        let mut out = String::new();
        out.push_str(DELIMITER);
        out.push('\n');

        if let Some(title) = &self.title {
            let _ = writeln!(out, "title: {}", quote(title));
        }
        if let Some(published_at) = &self.published_at {
            let _ = writeln!(out, "publishedAt: {}", published_at);
        }
        if let Some(summary) = &self.summary {
            let _ = writeln!(out, "summary: {}", quote(summary));
        }
        if let Some(image) = &self.image {
            let _ = writeln!(out, "image: {}", image);
        }
        if let Some(tags) = &self.tags {
            let tags = serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string());
            let _ = writeln!(out, "tags: {}", tags);
        }
        if let Some(velog_url) = &self.velog_url {
            let _ = writeln!(out, "velogUrl: {}", velog_url);
        }
        for (key, value) in &self.extra {
            let _ = writeln!(out, "{}: {}", key, value);
        }

        out.push_str(DELIMITER);
        out.push_str("\n\n");
        out.push_str(body);
        out
    }
}

/// Locate the first `---` block.
/// Returns (header, text_before_block, text_after_block)
fn split_block(content: &str) -> Result<(&str, &str, &str), FrontMatterError> {
    let mut offset = 0;
    let mut open: Option<(usize, usize)> = None;

    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        if line.trim_end() != DELIMITER {
            continue;
        }
        match open {
            None => open = Some((start, offset)),
            Some((open_start, header_start)) => {
                let header = &content[header_start..start];
                return Ok((header, &content[..open_start], &content[offset..]));
            }
        }
    }

    match open {
        Some((open_start, _)) => {
            let line = content[..open_start].lines().count() + 1;
            Err(FrontMatterError::Unclosed(line))
        }
        None => Err(FrontMatterError::MissingBlock),
    }
}

/// Strip one layer of matching quotes.
/// Double-quoted values are decoded as JSON strings when they are valid ones.
fn unquote(raw: &str) -> String {
    if raw.len() >= 2 {
        if raw.starts_with('"') && raw.ends_with('"') {
            return serde_json::from_str::<String>(raw)
                .unwrap_or_else(|_| raw[1..raw.len() - 1].to_string());
        }
        if raw.starts_with('\'') && raw.ends_with('\'') {
            return raw[1..raw.len() - 1].to_string();
        }
    }
    raw.to_string()
}

fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}
