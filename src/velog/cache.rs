//! Time-bounded cache in front of a remote post source
//!
//! The serving path wraps its client in [`CachedRemote`] so repeated page
//! loads do not hit Velog more than once per TTL window. Only successful
//! answers are kept; failures are retried on the next call.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::{Remote, RemotePostDetail, RemotePostSummary, RemotePosts};

struct Entry<V> {
    stored_at: Instant,
    value: V,
}

struct TtlMap<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash, V: Clone> TtlMap<K, V> {
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                value,
            },
        );
    }
}

/// A [`RemotePosts`] source whose successful answers are reused for `ttl`
pub struct CachedRemote<S> {
    inner: S,
    listings: TtlMap<(String, u32), Vec<RemotePostSummary>>,
    details: TtlMap<(String, String), RemotePostDetail>,
}

impl<S: RemotePosts> CachedRemote<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            listings: TtlMap::new(ttl),
            details: TtlMap::new(ttl),
        }
    }
}

impl<S: RemotePosts> RemotePosts for CachedRemote<S> {
    async fn list_posts(&self, account: &str, limit: u32) -> Remote<Vec<RemotePostSummary>> {
        let key = (account.to_string(), limit);
        if let Some(posts) = self.listings.get(&key) {
            tracing::debug!("Velog listing for @{} served from cache", account);
            return Remote::Found(posts);
        }

        let result = self.inner.list_posts(account, limit).await;
        if let Remote::Found(posts) = &result {
            self.listings.insert(key, posts.clone());
        }
        result
    }

    async fn post_detail(&self, account: &str, url_slug: &str) -> Remote<RemotePostDetail> {
        let key = (account.to_string(), url_slug.to_string());
        if let Some(post) = self.details.get(&key) {
            return Remote::Found(post);
        }

        let result = self.inner.post_detail(account, url_slug).await;
        if let Remote::Found(post) = &result {
            self.details.insert(key, post.clone());
        }
        result
    }
}
