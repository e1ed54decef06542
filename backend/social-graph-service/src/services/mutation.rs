//! Mutation pipeline: content creation and graph edits, each with its
//! rate-limit and cache-invalidation side effects.
//!
//! Every cache entry derived from data a mutation touches is deleted
//! within the same operation. The post-commit side effects run on a
//! detached task that is then awaited, so a caller disconnecting
//! mid-request cannot cancel an invalidation that a committed write
//! already requires.

use crate::cache::{keys, CacheStore};
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::repository::GraphRepository;
use crate::services::rate_limit::{RateLimitAction, RateLimiter};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct MutationService {
    graph: Arc<dyn GraphRepository>,
    cache: Arc<dyn CacheStore>,
    rate_limiter: RateLimiter,
    post_cooldown: Duration,
}

impl MutationService {
    pub fn new(
        graph: Arc<dyn GraphRepository>,
        cache: Arc<dyn CacheStore>,
        post_cooldown: Duration,
    ) -> Self {
        let rate_limiter = RateLimiter::new(Arc::clone(&cache));
        Self {
            graph,
            cache,
            rate_limiter,
            post_cooldown,
        }
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Create a post: validate, rate-check, insert, then start the
    /// cooldown window and invalidate the shared timeline entry.
    pub async fn create_post(
        &self,
        user_id: Uuid,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<Post> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::InvalidContent);
        }

        // Whitespace-only image URLs are stored as absent.
        let image_url = image_url.map(str::trim).filter(|url| !url.is_empty());

        self.rate_limiter
            .check(RateLimitAction::Post, user_id)
            .await?;

        let post = self.graph.insert_post(user_id, content, image_url).await?;

        let limiter = self.rate_limiter.clone();
        let cache = Arc::clone(&self.cache);
        let cooldown = self.post_cooldown;
        run_to_completion(async move {
            limiter
                .consume(RateLimitAction::Post, user_id, cooldown)
                .await?;
            cache.del(keys::ALL_POSTS).await
        })
        .await?;

        debug!(post_id = %post.id, author = %user_id, "post created");
        Ok(post)
    }

    /// Create a follow edge. Idempotent; refollowing is a no-op success.
    pub async fn follow(&self, from: Uuid, to: Uuid) -> Result<()> {
        if from == to {
            return Err(AppError::SelfFollow);
        }

        self.graph.create_follow(from, to).await?;
        self.invalidate_after_graph_edit(from, to).await
    }

    /// Remove a follow edge. Idempotent; unfollowing a non-followed
    /// user is a no-op success.
    pub async fn unfollow(&self, from: Uuid, to: Uuid) -> Result<()> {
        if from == to {
            return Err(AppError::SelfFollow);
        }

        self.graph.delete_follow(from, to).await?;
        self.invalidate_after_graph_edit(from, to).await
    }

    /// Drop every cache entry derived from either side of the edited
    /// edge. Deleting a missing key is a no-op.
    async fn invalidate_after_graph_edit(&self, from: Uuid, to: Uuid) -> Result<()> {
        let cache = Arc::clone(&self.cache);
        run_to_completion(async move {
            cache.del(&keys::recommended_users(from)).await?;
            cache.del(&keys::user_profile(from)).await?;
            cache.del(&keys::user_profile(to)).await
        })
        .await
    }
}

/// Drive `fut` on a detached task and await its outcome. The task
/// keeps running even if the awaiting request future is dropped.
async fn run_to_completion(
    fut: impl std::future::Future<Output = Result<()>> + Send + 'static,
) -> Result<()> {
    tokio::spawn(fut)
        .await
        .map_err(|err| AppError::Internal(format!("invalidation task failed: {err}")))?
}
