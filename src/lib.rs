//! velog-blog: content pipeline for a personal MDX blog
//!
//! Local MDX posts and posts mirrored from Velog are read from one content
//! directory, merged into a single date-sorted collection, and exposed to a
//! presentation layer. The `sync` command mirrors a Velog account into that
//! directory through Velog's GraphQL API.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod velog;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory holding local `.mdx` posts
    pub content_dir: PathBuf,
    /// Directory holding documents mirrored from Velog
    pub velog_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::BlogConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let velog_dir = content_dir.join(&config.velog_dir);

        Self {
            config,
            base_dir,
            content_dir,
            velog_dir,
        }
    }

    /// All posts on disk, local and mirrored, newest first
    pub fn posts(&self) -> Result<Vec<content::Post>> {
        content::aggregate::get_blog_posts(self)
    }
}
