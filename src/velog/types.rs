//! Velog GraphQL payloads

use serde::{Deserialize, Deserializer, Serialize};

/// Base URL of public Velog post pages
pub const VELOG_BASE_URL: &str = "https://velog.io";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VelogUser {
    pub username: String,
}

/// A post as returned by the `Posts` listing query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePostSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub user: VelogUser,
    pub url_slug: String,
    pub released_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

/// A post as returned by the `Post` detail query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePostDetail {
    #[serde(flatten)]
    pub summary: RemotePostSummary,
    #[serde(default)]
    pub body: String,
}

/// Velog sends `null` for posts without tags
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `https://velog.io/@{account}/{slug}`
pub fn post_url(account: &str, slug: &str) -> String {
    format!("{}/@{}/{}", VELOG_BASE_URL, account, slug)
}

/// GraphQL request envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphQlRequest<'a, V> {
    pub operation_name: &'a str,
    pub variables: V,
    pub query: &'a str,
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct PostsVariables<'a> {
    pub username: &'a str,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct PostVariables<'a> {
    pub username: &'a str,
    pub url_slug: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostsData {
    pub posts: Option<Vec<RemotePostSummary>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostData {
    pub post: Option<RemotePostDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_detail() {
        let json = r#"{
            "id": "1",
            "title": "Hello",
            "short_description": null,
            "thumbnail": null,
            "user": { "username": "alice" },
            "url_slug": "hello",
            "released_at": "2024-01-01T00:00:00.000Z",
            "updated_at": "2024-01-02T00:00:00.000Z",
            "tags": ["rust"],
            "body": "Body text"
        }"#;

        let detail: RemotePostDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.summary.url_slug, "hello");
        assert_eq!(detail.summary.short_description, None);
        assert_eq!(detail.summary.tags, vec!["rust"]);
        assert_eq!(detail.body, "Body text");
    }

    #[test]
    fn test_null_tags() {
        let json = r#"{
            "id": "2",
            "title": "Untagged",
            "user": { "username": "alice" },
            "url_slug": "untagged",
            "released_at": "2024-01-01T00:00:00.000Z",
            "tags": null
        }"#;

        let summary: RemotePostSummary = serde_json::from_str(json).unwrap();
        assert!(summary.tags.is_empty());
        assert_eq!(summary.thumbnail, None);
    }

    #[test]
    fn test_request_envelope() {
        let request = GraphQlRequest {
            operation_name: "Post",
            variables: PostVariables {
                username: "alice",
                url_slug: "hello",
            },
            query: "query Post { post { id } }",
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["operationName"], "Post");
        assert_eq!(json["variables"]["url_slug"], "hello");
        assert_eq!(json["variables"]["username"], "alice");
    }

    #[test]
    fn test_post_url() {
        assert_eq!(post_url("alice", "my-post"), "https://velog.io/@alice/my-post");
    }
}
