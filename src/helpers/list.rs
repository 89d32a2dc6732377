//! List helper functions for category tabs, filtering and reading time

use serde::Serialize;
use std::collections::BTreeMap;

use crate::content::Post;

/// Category that matches every post
pub const ALL: &str = "All";

const WORDS_PER_MINUTE: usize = 200;

/// A category tab with the number of posts in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Category of a post: its first tag, `Velog` for untagged Velog posts,
/// `Uncategorized` otherwise
pub fn category_of(post: &Post) -> &str {
    match post.tags.first() {
        Some(tag) => tag.as_str(),
        None if post.is_velog_post => "Velog",
        None => "Uncategorized",
    }
}

/// `All` followed by every category in name order, with post counts
pub fn list_categories(posts: &[Post]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for post in posts {
        *counts.entry(category_of(post)).or_insert(0) += 1;
    }

    let mut categories = vec![CategoryCount {
        name: ALL.to_string(),
        count: posts.len(),
    }];
    categories.extend(counts.into_iter().map(|(name, count)| CategoryCount {
        name: name.to_string(),
        count,
    }));
    categories
}

/// Posts in `category`, keeping their order, optionally truncated.
/// A limit of zero means no limit.
pub fn filter_posts<'a>(posts: &'a [Post], category: &str, limit: Option<usize>) -> Vec<&'a Post> {
    let limit = limit.filter(|&n| n > 0).unwrap_or(usize::MAX);
    posts
        .iter()
        .filter(|p| category == ALL || category_of(p) == category)
        .take(limit)
        .collect()
}

/// Estimated reading time in whole minutes, rounded up
pub fn reading_time(content: &str) -> usize {
    let words = content.split_whitespace().count().max(1);
    words.div_ceil(WORDS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    fn post(slug: &str, tags: &[&str], velog: bool) -> Post {
        let fm = FrontMatter {
            title: Some(slug.to_string()),
            published_at: Some("2024-01-01".to_string()),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            ..Default::default()
        };
        let mut post = Post::from_front_matter(slug.to_string(), fm, String::new()).unwrap();
        post.is_velog_post = velog;
        post
    }

    fn sample() -> Vec<Post> {
        vec![
            post("a", &["rust", "cli"], false),
            post("b", &[], true),
            post("c", &[], false),
            post("d", &["rust"], true),
        ]
    }

    #[test]
    fn test_category_of() {
        let posts = sample();
        assert_eq!(category_of(&posts[0]), "rust");
        assert_eq!(category_of(&posts[1]), "Velog");
        assert_eq!(category_of(&posts[2]), "Uncategorized");
    }

    #[test]
    fn test_list_categories() {
        let names: Vec<_> = list_categories(&sample())
            .into_iter()
            .map(|c| (c.name, c.count))
            .collect();
        assert_eq!(
            names,
            vec![
                ("All".to_string(), 4),
                ("Uncategorized".to_string(), 1),
                ("Velog".to_string(), 1),
                ("rust".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_filter_posts() {
        let posts = sample();
        let slugs = |v: Vec<&Post>| v.into_iter().map(|p| p.slug.clone()).collect::<Vec<_>>();

        assert_eq!(slugs(filter_posts(&posts, "rust", None)), vec!["a", "d"]);
        assert_eq!(slugs(filter_posts(&posts, ALL, Some(2))), vec!["a", "b"]);
        assert!(filter_posts(&posts, "missing", None).is_empty());
        assert_eq!(filter_posts(&posts, ALL, Some(0)).len(), 4);
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("one two three"), 1);
        assert_eq!(reading_time(&"word ".repeat(200)), 1);
        assert_eq!(reading_time(&"word ".repeat(201)), 2);
    }
}
