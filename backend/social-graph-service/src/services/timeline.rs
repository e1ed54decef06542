//! Read-through cache for the global timeline.
//!
//! The post list is global, so a single shared key (`ALL_POSTS`)
//! covers every reader and one delete invalidates it.

use crate::cache::{keys, CacheStore};
use crate::error::Result;
use crate::models::Post;
use crate::repository::GraphRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct TimelineService {
    graph: Arc<dyn GraphRepository>,
    cache: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl TimelineService {
    pub fn new(graph: Arc<dyn GraphRepository>, cache: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { graph, cache, ttl }
    }

    /// All posts, newest first. Same corrupt-entry self-healing and
    /// empty-result rules as the recommendation cache.
    pub async fn get_all_posts(&self) -> Result<Vec<Post>> {
        match self.cache.get(keys::ALL_POSTS).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Post>>(&raw) {
                Ok(posts) => {
                    debug!("cache hit for timeline");
                    return Ok(posts);
                }
                Err(err) => {
                    warn!(error = %err, "corrupt timeline cache entry, discarding");
                    if let Err(err) = self.cache.del(keys::ALL_POSTS).await {
                        warn!(error = %err, "failed to delete corrupt timeline entry");
                    }
                }
            },
            Ok(None) => debug!("cache miss for timeline"),
            Err(err) => warn!(error = %err, "timeline cache unavailable, falling through"),
        }

        let posts = self.graph.list_posts_desc().await?;

        if !posts.is_empty() {
            match serde_json::to_string(&posts) {
                Ok(json) => {
                    if let Err(err) = self.cache.set_ex(keys::ALL_POSTS, &json, self.ttl).await {
                        warn!(error = %err, "failed to cache timeline");
                    }
                }
                Err(err) => warn!(error = %err, "failed to serialize timeline"),
            }
        }

        Ok(posts)
    }

    /// Drop the shared timeline entry so the next read is a miss.
    pub async fn invalidate(&self) -> Result<()> {
        self.cache.del(keys::ALL_POSTS).await
    }
}
