use crate::error::Result;
use crate::models::{FollowingNetwork, Post};
use async_trait::async_trait;
use uuid::Uuid;

/// Interface over the durable social graph and content store.
///
/// The database is the sole source of truth; everything in the cache
/// layer is reconstructable from these queries. Implementations must
/// be safe for concurrent use and must return edges in a stable,
/// creation-ordered iteration order.
#[async_trait]
pub trait GraphRepository: Send + Sync {
    /// Create a follow edge. Idempotent: following an already-followed
    /// user is a no-op. Returns true if a new edge was inserted.
    async fn create_follow(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool>;

    /// Delete a follow edge. Idempotent: unfollowing a non-followed
    /// user is a no-op. Returns true if an edge was removed.
    async fn delete_follow(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool>;

    /// Users who follow `user_id`, oldest edge first.
    async fn list_followers(&self, user_id: Uuid) -> Result<Vec<Uuid>>;

    /// Users that `user_id` follows, oldest edge first.
    async fn list_following(&self, user_id: Uuid) -> Result<Vec<Uuid>>;

    /// For each user that `user_id` follows, the users *they* follow —
    /// the two-hop neighborhood fetched in a single round-trip.
    async fn following_network(&self, user_id: Uuid) -> Result<Vec<FollowingNetwork>>;

    /// Insert a post. Single atomic insert; `created_at` is assigned
    /// by the store.
    async fn insert_post(
        &self,
        author_id: Uuid,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<Post>;

    /// All posts, newest first.
    async fn list_posts_desc(&self) -> Result<Vec<Post>>;

    /// Health check (optional)
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
