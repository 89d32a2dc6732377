//! JSON API consumed by the presentation layer

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{aggregate, Post};
use crate::helpers::{
    category_of, filter_posts, format_date, list_categories, reading_time, CategoryCount, ALL,
};
use crate::velog::{CachedRemote, RemotePosts, VelogClient};
use crate::Blog;

/// Server state
pub struct AppState<S> {
    pub blog: Blog,
    pub remote: S,
    /// Velog account merged into listings; `None` serves disk posts only
    pub account: Option<String>,
}

/// Start the API server
pub async fn start(blog: &Blog, account: Option<String>, ip: &str, port: u16) -> Result<()> {
    let client = VelogClient::from_config(&blog.config)?;
    let remote = CachedRemote::new(client, blog.config.cache_ttl());

    if account.is_none() {
        tracing::warn!("No Velog account configured, serving posts on disk only");
    }

    let app = router(AppState {
        blog: blog.clone(),
        remote,
        account,
    });

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the API router
pub fn router<S: RemotePosts + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/posts", get(list_posts::<S>))
        .route("/api/posts/:slug", get(get_post::<S>))
        .route("/api/categories", get(categories::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// A post with the display fields the listing needs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView<'a> {
    #[serde(flatten)]
    pub post: &'a Post,
    pub category: &'a str,
    pub formatted_date: String,
    pub reading_time: usize,
}

impl<'a> PostView<'a> {
    fn new(post: &'a Post) -> Self {
        Self {
            post,
            category: category_of(post),
            formatted_date: format_date(&post.published_at, false),
            reading_time: reading_time(&post.content),
        }
    }
}

/// Internal failure, reported as 500 without details
pub struct ServerError(anyhow::Error);

impl From<anyhow::Error> for ServerError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

async fn load_posts<S: RemotePosts>(state: &AppState<S>) -> Result<Vec<Post>> {
    aggregate::get_live_posts(&state.blog, &state.remote, state.account.as_deref()).await
}

async fn list_posts<S: RemotePosts>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<PostsQuery>,
) -> Result<Response, ServerError> {
    let posts = load_posts(&state).await?;
    let category = query.category.as_deref().unwrap_or(ALL);

    let views: Vec<PostView> = filter_posts(&posts, category, query.limit)
        .into_iter()
        .map(PostView::new)
        .collect();

    Ok(Json(views).into_response())
}

async fn get_post<S: RemotePosts>(
    State(state): State<Arc<AppState<S>>>,
    Path(slug): Path<String>,
) -> Result<Response, ServerError> {
    let posts = load_posts(&state).await?;

    match posts.iter().find(|p| p.slug == slug) {
        Some(post) => Ok(Json(PostView::new(post)).into_response()),
        None => Ok((StatusCode::NOT_FOUND, "Not Found").into_response()),
    }
}

async fn categories<S: RemotePosts>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<CategoryCount>>, ServerError> {
    let posts = load_posts(&state).await?;
    Ok(Json(list_categories(&posts)))
}
