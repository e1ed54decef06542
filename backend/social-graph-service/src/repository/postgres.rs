use crate::error::Result;
use crate::models::{FollowingNetwork, Post};
use crate::repository::GraphRepository;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL repository for the social graph (source of truth)
#[derive(Clone)]
pub struct PostgresGraphRepository {
    pool: PgPool,
}

impl PostgresGraphRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GraphRepository for PostgresGraphRepository {
    async fn create_follow(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool> {
        let inserted = sqlx::query_as::<_, (Uuid,)>(
            r#"
            INSERT INTO follows (follower_id, following_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (follower_id, following_id) DO NOTHING
            RETURNING follower_id
            "#,
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_optional(&self.pool)
        .await?;

        debug!(
            "created FOLLOWS: {} -> {} (new: {})",
            follower_id,
            following_id,
            inserted.is_some()
        );
        Ok(inserted.is_some())
    }

    async fn delete_follow(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
            .bind(follower_id)
            .bind(following_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        debug!(
            "deleted FOLLOWS: {} -> {} (removed: {})",
            follower_id,
            following_id,
            affected > 0
        );
        Ok(affected > 0)
    }

    async fn list_followers(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let rows = sqlx::query_as::<_, (Uuid,)>(
            r#"
            SELECT follower_id FROM follows
            WHERE following_id = $1
            ORDER BY created_at, follower_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn list_following(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let rows = sqlx::query_as::<_, (Uuid,)>(
            r#"
            SELECT following_id FROM follows
            WHERE follower_id = $1
            ORDER BY created_at, following_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn following_network(&self, user_id: Uuid) -> Result<Vec<FollowingNetwork>> {
        // One joined round-trip for both hops. The ORDER BY pins a
        // deterministic traversal order (edge age, then id) instead of
        // relying on scan order.
        let rows = sqlx::query_as::<_, (Uuid, Option<Uuid>)>(
            r#"
            SELECT f1.following_id, f2.following_id
            FROM follows f1
            LEFT JOIN follows f2 ON f2.follower_id = f1.following_id
            WHERE f1.follower_id = $1
            ORDER BY f1.created_at, f1.following_id, f2.created_at, f2.following_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut network: Vec<FollowingNetwork> = Vec::new();
        for (following_id, candidate) in rows {
            match network.last_mut() {
                Some(entry) if entry.following_id == following_id => {
                    if let Some(candidate) = candidate {
                        entry.their_following.push(candidate);
                    }
                }
                _ => network.push(FollowingNetwork {
                    following_id,
                    their_following: candidate.into_iter().collect(),
                }),
            }
        }

        Ok(network)
    }

    async fn insert_post(
        &self,
        author_id: Uuid,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (author_id, content, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, author_id, content, image_url, created_at
            "#,
        )
        .bind(author_id)
        .bind(content)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await?;

        debug!(post_id = %post.id, author = %author_id, "created post");
        Ok(post)
    }

    async fn list_posts_desc(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, content, image_url, created_at
            FROM posts
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
