//! Content loader - loads post documents from the content directory

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post};
use crate::Blog;

/// A post document read from disk, before it becomes a [`Post`]
#[derive(Debug, Clone)]
pub struct Document {
    /// File name without extension
    pub stem: String,
    pub front_matter: FrontMatter,
    pub body: String,
    pub path: PathBuf,
}

impl Document {
    /// Convert into a local post identified by the file name
    pub fn into_post(self) -> Option<Post> {
        let path = self.path;
        let mut post = Post::from_front_matter(self.stem, self.front_matter, self.body)?;
        post.source = Some(path);
        Some(post)
    }
}

/// Loads documents from the content directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self { blog }
    }

    /// Load local posts from the root of the content directory
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts = self
            .load_documents(&self.blog.content_dir)?
            .into_iter()
            .filter_map(|doc| {
                let path = doc.path.clone();
                let post = doc.into_post();
                if post.is_none() {
                    tracing::warn!("Skipping {:?}: missing title or invalid publishedAt", path);
                }
                post
            })
            .collect();
        Ok(posts)
    }

    /// Load documents mirrored from Velog. A missing directory yields none.
    pub fn load_velog_documents(&self) -> Result<Vec<Document>> {
        self.load_documents(&self.blog.velog_dir)
    }

    /// Load every post document directly inside `dir`, in enumeration order.
    ///
    /// Documents that cannot be read or have no front-matter block are
    /// skipped with a warning.
    pub fn load_documents(&self, dir: &Path) -> Result<Vec<Document>> {
        if !dir.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", dir);
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && self.is_post_file(path) {
                match load_document(path) {
                    Ok(doc) => documents.push(doc),
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(documents)
    }

    /// Check the extension against the configured one (case-sensitive)
    fn is_post_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.blog.config.post_extension)
            .unwrap_or(false)
    }
}

/// Read and parse a single document
pub fn load_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)?;
    let (front_matter, body) = FrontMatter::parse(&content)?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(Document {
        stem,
        front_matter,
        body,
        path: path.to_path_buf(),
    })
}
