//! Post aggregation - merges local, mirrored, and live Velog posts

use anyhow::Result;
use std::collections::HashSet;

use super::loader::{ContentLoader, Document};
use super::post::parse_date_string;
use super::Post;
use crate::velog::{post_url, RemotePostSummary, RemotePosts};
use crate::Blog;

/// Load local and mirrored posts from disk, newest first
pub fn get_blog_posts(blog: &Blog) -> Result<Vec<Post>> {
    let loader = ContentLoader::new(blog);
    let local = loader.load_posts()?;
    let velog = loader
        .load_velog_documents()?
        .into_iter()
        .filter_map(|doc| {
            let path = doc.path.clone();
            let post = velog_post(doc);
            if post.is_none() {
                tracing::warn!("Skipping {:?}: missing title or invalid publishedAt", path);
            }
            post
        })
        .collect();

    let posts = aggregate(local, velog);
    tracing::debug!("Aggregated {} posts", posts.len());
    Ok(posts)
}

/// Posts on disk merged with the account's current Velog listing.
///
/// Listing entries whose slug already belongs to a mirrored document are
/// dropped. A failed listing contributes nothing.
pub async fn get_live_posts<S: RemotePosts>(
    blog: &Blog,
    remote: &S,
    account: Option<&str>,
) -> Result<Vec<Post>> {
    let posts = get_blog_posts(blog)?;

    let Some(account) = account else {
        return Ok(posts);
    };

    let summaries = remote
        .list_posts(account, blog.config.list_limit)
        .await
        .unwrap_or_default();

    Ok(merge_remote(posts, summaries))
}

/// Merge remote listing entries into an aggregated collection
pub fn merge_remote(posts: Vec<Post>, summaries: Vec<RemotePostSummary>) -> Vec<Post> {
    let mirrored: HashSet<String> = posts
        .iter()
        .filter(|p| p.is_velog_post)
        .map(|p| p.slug.clone())
        .collect();

    let live = summaries
        .into_iter()
        .filter(|s| !mirrored.contains(&s.url_slug))
        .filter_map(summary_post)
        .collect();

    aggregate(posts, live)
}

/// Concatenate two groups and sort newest first.
/// Ties keep their relative order, so `first` wins over `second`.
pub fn aggregate(first: Vec<Post>, second: Vec<Post>) -> Vec<Post> {
    let mut posts = first;
    posts.extend(second);
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    posts
}

/// Convert a mirrored document into a post identified by its Velog slug
pub fn velog_post(doc: Document) -> Option<Post> {
    let velog_url = doc.front_matter.velog_url.clone().filter(|u| !u.is_empty());
    let slug = velog_url
        .as_deref()
        .and_then(slug_from_url)
        .map(str::to_string)
        .unwrap_or_else(|| doc.stem.clone());

    let mut post = doc.into_post()?;
    post.slug = slug;
    post.is_velog_post = velog_url.is_some();
    post.velog_url = velog_url;
    Some(post)
}

/// Convert a listing entry into a post without body
pub fn summary_post(summary: RemotePostSummary) -> Option<Post> {
    let Some(date) = parse_date_string(&summary.released_at) else {
        tracing::warn!(
            "Skipping Velog post {:?}: invalid released_at {:?}",
            summary.url_slug,
            summary.released_at
        );
        return None;
    };
    if summary.title.trim().is_empty() {
        tracing::warn!("Skipping Velog post {:?}: missing title", summary.url_slug);
        return None;
    }

    Some(Post {
        velog_url: Some(post_url(&summary.user.username, &summary.url_slug)),
        slug: summary.url_slug,
        title: summary.title,
        published_at: summary.released_at,
        date,
        summary: summary.short_description.unwrap_or_default(),
        image: summary.thumbnail.filter(|t| !t.is_empty()),
        tags: summary.tags,
        content: String::new(),
        is_velog_post: true,
        source: None,
    })
}

/// Last `/`-separated segment of a URL, if non-empty
pub fn slug_from_url(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|s| !s.is_empty())
}
