//! HTTP client for Velog's GraphQL endpoint

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::types::{
    GraphQlRequest, GraphQlResponse, PostData, PostVariables, PostsData, PostsVariables,
};
use super::{Remote, RemoteError, RemotePostDetail, RemotePostSummary, RemotePosts};
use crate::config::BlogConfig;

const POSTS_QUERY: &str = r#"
    query Posts($cursor: ID, $username: String, $limit: Int) {
      posts(cursor: $cursor, username: $username, limit: $limit) {
        id
        title
        short_description
        thumbnail
        user {
          username
        }
        url_slug
        released_at
        updated_at
        tags
      }
    }
"#;

const POST_QUERY: &str = r#"
    query Post($username: String, $url_slug: String) {
      post(username: $username, url_slug: $url_slug) {
        id
        title
        short_description
        thumbnail
        user {
          username
        }
        url_slug
        released_at
        updated_at
        tags
        body
      }
    }
"#;

/// Client for the Velog GraphQL API
#[derive(Clone)]
pub struct VelogClient {
    client: reqwest::Client,
    endpoint: String,
}

impl VelogClient {
    /// Create a client for `endpoint`, giving up on requests after `timeout`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Create a client from the site configuration
    pub fn from_config(config: &BlogConfig) -> reqwest::Result<Self> {
        Self::new(&config.velog_endpoint, config.request_timeout())
    }

    /// POST one GraphQL operation and decode its `data` member
    async fn execute<V, T>(
        &self,
        operation_name: &str,
        query: &str,
        variables: V,
    ) -> Result<Option<T>, RemoteError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest {
                operation_name,
                variables,
                query,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        let body: GraphQlResponse<T> = resp.json().await?;
        match (body.data, body.errors.first()) {
            (Some(data), _) => Ok(Some(data)),
            (None, Some(err)) => Err(RemoteError::GraphQl(err.message.clone())),
            (None, None) => Ok(None),
        }
    }
}

impl RemotePosts for VelogClient {
    async fn list_posts(&self, account: &str, limit: u32) -> Remote<Vec<RemotePostSummary>> {
        let variables = PostsVariables {
            username: account,
            limit,
        };

        match self
            .execute::<_, PostsData>("Posts", POSTS_QUERY, variables)
            .await
        {
            Ok(Some(PostsData { posts: Some(posts) })) => {
                tracing::debug!("Fetched {} Velog posts for @{}", posts.len(), account);
                Remote::Found(posts)
            }
            Ok(_) => Remote::NotFound,
            Err(e) => {
                tracing::error!("Failed to fetch Velog posts for @{}: {}", account, e);
                Remote::Failed(e)
            }
        }
    }

    async fn post_detail(&self, account: &str, url_slug: &str) -> Remote<RemotePostDetail> {
        let variables = PostVariables {
            username: account,
            url_slug,
        };

        match self
            .execute::<_, PostData>("Post", POST_QUERY, variables)
            .await
        {
            Ok(Some(PostData { post: Some(post) })) => Remote::Found(post),
            Ok(_) => Remote::NotFound,
            Err(e) => {
                tracing::error!(
                    "Failed to fetch Velog post detail @{}/{}: {}",
                    account,
                    url_slug,
                    e
                );
                Remote::Failed(e)
            }
        }
    }
}
