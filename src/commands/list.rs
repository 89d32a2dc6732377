//! List site content

use anyhow::Result;

use crate::content::aggregate;
use crate::content::Post;
use crate::helpers::{filter_posts, format_date, list_categories, reading_time, ALL};
use crate::velog::VelogClient;
use crate::Blog;

/// Options for `list` and `categories`
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Category tab to show; `None` means all posts
    pub category: Option<String>,
    pub limit: Option<usize>,
    /// Merge the account's current Velog listing into the result
    pub live: bool,
    /// Account for the live listing
    pub account: Option<String>,
}

/// List posts, newest first
pub async fn run(blog: &Blog, options: &ListOptions) -> Result<()> {
    let posts = load(blog, options).await?;
    let category = options.category.as_deref().unwrap_or(ALL);
    let shown = filter_posts(&posts, category, options.limit);

    println!("Posts ({}):", shown.len());
    for post in shown {
        println!("{}", describe(post));
    }

    Ok(())
}

/// List category tabs with post counts
pub async fn categories(blog: &Blog, options: &ListOptions) -> Result<()> {
    let posts = load(blog, options).await?;
    let categories = list_categories(&posts);

    println!("Categories ({}):", categories.len() - 1);
    for category in categories {
        println!("  {} ({})", category.name, category.count);
    }

    Ok(())
}

async fn load(blog: &Blog, options: &ListOptions) -> Result<Vec<Post>> {
    if !options.live {
        return blog.posts();
    }

    if options.account.is_none() {
        tracing::warn!("No Velog account configured, listing posts on disk only");
    }
    let remote = VelogClient::from_config(&blog.config)?;
    aggregate::get_live_posts(blog, &remote, options.account.as_deref()).await
}

fn describe(post: &Post) -> String {
    let origin = if post.is_velog_post { " [Velog]" } else { "" };
    let mut line = format!(
        "  {} - {}{} ({})",
        format_date(&post.published_at, true),
        post.title,
        origin,
        post.slug
    );
    if !post.content.is_empty() {
        line.push_str(&format!(", {} min read", reading_time(&post.content)));
    }
    line
}
