//! Mirror Velog posts into the content directory

use anyhow::Result;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, SyncConfig};
use crate::content::FrontMatter;
use crate::velog::{post_url, Remote, RemotePostDetail, RemotePosts};
use crate::Blog;

/// Outcome of a sync run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub succeeded: usize,
    pub failed: usize,
    /// Documents written, in processing order
    pub written: Vec<PathBuf>,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Success: {}, Failed: {}", self.succeeded, self.failed)
    }
}

/// Fetch every post of the configured account and write it as a document
/// under the Velog directory, overwriting earlier copies.
///
/// Per-post failures are counted and skipped. The only error returned is a
/// missing account handle.
pub async fn run<S: RemotePosts>(blog: &Blog, config: &SyncConfig, remote: &S) -> Result<SyncReport> {
    let account = config.account_handle.trim();
    if account.is_empty() {
        return Err(ConfigError::MissingAccount.into());
    }

    println!("Fetching posts from @{}...", account);

    let posts = match remote.list_posts(account, config.limit).await {
        Remote::Found(posts) => posts,
        Remote::NotFound => Vec::new(),
        Remote::Failed(e) => {
            eprintln!("Could not fetch the post list: {}", e);
            Vec::new()
        }
    };

    let mut report = SyncReport::default();
    if posts.is_empty() {
        println!("No posts found.");
        return Ok(report);
    }

    println!("Found {} posts. Fetching details...", posts.len());
    // Nothing can be saved without the directory: the whole batch fails
    if let Err(e) = fs::create_dir_all(&blog.velog_dir) {
        eprintln!("Could not create {}: {}", blog.velog_dir.display(), e);
        report.failed = posts.len();
        return Ok(finish(report));
    }

    for (i, post) in posts.iter().enumerate() {
        if i > 0 && !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }

        println!("Fetching: {}...", post.title);
        let detail = match remote.post_detail(account, &post.url_slug).await {
            Remote::Found(detail) => detail,
            Remote::NotFound | Remote::Failed(_) => {
                eprintln!("Failed to fetch details for: {}", post.title);
                report.failed += 1;
                continue;
            }
        };

        match write_document(&blog.velog_dir, &blog.config.post_extension, account, &detail) {
            Ok(path) => {
                println!("✓ Saved: {}", path.display());
                report.succeeded += 1;
                report.written.push(path);
            }
            Err(e) => {
                eprintln!("Error processing {}: {}", post.title, e);
                report.failed += 1;
            }
        }
    }

    Ok(finish(report))
}

fn finish(report: SyncReport) -> SyncReport {
    println!("\nSync completed!");
    println!("{}", report);
    tracing::info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "Velog sync finished"
    );
    report
}

/// Render a fetched post as a document
pub fn render_document(account: &str, detail: &RemotePostDetail) -> String {
    let post = &detail.summary;
    let fm = FrontMatter {
        title: Some(post.title.clone()),
        published_at: Some(post.released_at.clone()),
        summary: Some(post.short_description.clone().unwrap_or_default()),
        image: post.thumbnail.clone().filter(|t| !t.is_empty()),
        tags: Some(post.tags.clone()).filter(|t| !t.is_empty()),
        velog_url: Some(post_url(account, &post.url_slug)),
        ..Default::default()
    };
    fm.render(&detail.body)
}

/// File name for a slug; path separators are replaced so the document
/// always lands directly inside the Velog directory
pub fn document_name(url_slug: &str, extension: &str) -> String {
    let stem: String = url_slug
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();
    format!("{}.{}", stem, extension)
}

fn write_document(
    dir: &Path,
    extension: &str,
    account: &str,
    detail: &RemotePostDetail,
) -> Result<PathBuf> {
    let path = dir.join(document_name(&detail.summary.url_slug, extension));
    fs::write(&path, render_document(account, detail))?;
    Ok(path)
}
