#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use velog_blog::velog::{
    Remote, RemoteError, RemotePostDetail, RemotePostSummary, RemotePosts, VelogUser,
};

pub fn summary(slug: &str, title: &str, released_at: &str, tags: &[&str]) -> RemotePostSummary {
    RemotePostSummary {
        id: format!("id-{}", slug),
        title: title.to_string(),
        short_description: Some(format!("About {}", title)),
        thumbnail: None,
        user: VelogUser {
            username: "alice".to_string(),
        },
        url_slug: slug.to_string(),
        released_at: released_at.to_string(),
        updated_at: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn detail(summary: &RemotePostSummary, body: &str) -> RemotePostDetail {
    RemotePostDetail {
        summary: summary.clone(),
        body: body.to_string(),
    }
}

/// In-memory Velog
#[derive(Default)]
pub struct MockRemote {
    pub summaries: Vec<RemotePostSummary>,
    pub bodies: HashMap<String, String>,
    /// Slugs whose detail fetch fails
    pub failing: HashSet<String>,
    pub list_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl MockRemote {
    pub fn new(summaries: Vec<RemotePostSummary>) -> Self {
        let bodies = summaries
            .iter()
            .map(|s| (s.url_slug.clone(), format!("# {}\n\nBody of {}.", s.title, s.url_slug)))
            .collect();
        Self {
            summaries,
            bodies,
            ..Default::default()
        }
    }

    pub fn failing(mut self, slug: &str) -> Self {
        self.failing.insert(slug.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst) + self.detail_calls.load(Ordering::SeqCst)
    }
}

impl RemotePosts for MockRemote {
    async fn list_posts(&self, _account: &str, limit: u32) -> Remote<Vec<RemotePostSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Remote::Found(self.summaries.iter().take(limit as usize).cloned().collect())
    }

    async fn post_detail(&self, _account: &str, url_slug: &str) -> Remote<RemotePostDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(url_slug) {
            return Remote::Failed(RemoteError::GraphQl("simulated failure".to_string()));
        }
        match self.summaries.iter().find(|s| s.url_slug == url_slug) {
            Some(s) => Remote::Found(detail(s, &self.bodies[url_slug])),
            None => Remote::NotFound,
        }
    }
}

/// Requests received by a [`spawn_graphql`] server
pub type Requests = Arc<Mutex<Vec<Value>>>;

/// How the stand-in GraphQL endpoint answers
#[derive(Clone)]
pub enum Behavior {
    /// Serve these posts; details exist for every listed slug
    Posts(Vec<RemotePostSummary>),
    /// Reply with this status and an empty body
    Status(StatusCode),
    /// Reply 200 with a GraphQL error and no data
    GraphQlError(String),
}

#[derive(Clone)]
struct ServerState {
    behavior: Behavior,
    requests: Requests,
}

async fn graphql(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(body.clone());

    let posts = match state.behavior {
        Behavior::Status(status) => return (status, Json(json!({}))),
        Behavior::GraphQlError(message) => {
            return (
                StatusCode::OK,
                Json(json!({ "data": null, "errors": [{ "message": message }] })),
            )
        }
        Behavior::Posts(posts) => posts,
    };

    match body["operationName"].as_str() {
        Some("Posts") => (StatusCode::OK, Json(json!({ "data": { "posts": posts } }))),
        Some("Post") => {
            let slug = body["variables"]["url_slug"].as_str().unwrap_or_default();
            let post = posts.iter().find(|p| p.url_slug == slug).map(|p| {
                let mut value = serde_json::to_value(p).unwrap();
                value["body"] = json!(format!("Body of {}", slug));
                value
            });
            (StatusCode::OK, Json(json!({ "data": { "post": post } })))
        }
        _ => (StatusCode::BAD_REQUEST, Json(json!({}))),
    }
}

/// Start a GraphQL endpoint on an ephemeral port; returns its URL
pub async fn spawn_graphql(behavior: Behavior) -> (String, Requests) {
    let requests = Requests::default();
    let app = Router::new()
        .route("/graphql", post(graphql))
        .with_state(ServerState {
            behavior,
            requests: requests.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/graphql", addr), requests)
}
