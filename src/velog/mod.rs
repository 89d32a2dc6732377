//! Velog remote source - GraphQL client, cache, and result types
//!
//! Remote calls never fail loudly. Every operation returns a [`Remote`] so
//! callers can tell "nothing there" apart from "could not ask", while the
//! serving path can still collapse both into an empty result.

mod cache;
mod client;
mod types;

use std::future::Future;
use thiserror::Error;

pub use cache::CachedRemote;
pub use client::VelogClient;
pub use types::{post_url, RemotePostDetail, RemotePostSummary, VelogUser, VELOG_BASE_URL};

/// Remote fetch errors
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("GraphQL error: {0}")]
    GraphQl(String),
}

/// Outcome of a remote fetch
#[derive(Debug)]
pub enum Remote<T> {
    /// The service answered with data
    Found(T),
    /// The service answered, but had nothing for the request
    NotFound,
    /// The service could not be reached or answered with an error
    Failed(RemoteError),
}

impl<T> Remote<T> {
    /// The data, if the service returned any
    pub fn found(self) -> Option<T> {
        match self {
            Remote::Found(value) => Some(value),
            Remote::NotFound | Remote::Failed(_) => None,
        }
    }
}

impl<T: Default> Remote<T> {
    /// Degrade "not found" and failures to an empty value
    pub fn unwrap_or_default(self) -> T {
        self.found().unwrap_or_default()
    }
}

/// A source of Velog posts
pub trait RemotePosts: Send + Sync {
    /// First page of an account's posts, newest first
    fn list_posts(
        &self,
        account: &str,
        limit: u32,
    ) -> impl Future<Output = Remote<Vec<RemotePostSummary>>> + Send;

    /// Full post, including the body
    fn post_detail(
        &self,
        account: &str,
        url_slug: &str,
    ) -> impl Future<Output = Remote<RemotePostDetail>> + Send;
}
