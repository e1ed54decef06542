//! In-memory stand-ins for the networked dependencies.
//!
//! `InMemoryGraph` keeps edges and posts in insertion order, matching
//! the deterministic creation-ordered iteration the Postgres
//! repository pins with ORDER BY. `InMemoryCache` honors TTLs against
//! the tokio clock so paused-time tests can step past expiry.

use async_trait::async_trait;
use chrono::Utc;
use social_graph_service::cache::CacheStore;
use social_graph_service::error::Result;
use social_graph_service::models::{FollowingNetwork, Post};
use social_graph_service::repository::GraphRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant a raw value (e.g. undeserializable garbage) under a key.
    pub fn insert_raw(&self, key: &str, value: &str) {
        let expires = Instant::now() + Duration::from_secs(3600);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), expires));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(_, expires)| *expires > Instant::now())
            .unwrap_or(false)
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some((value, expires)) if *expires > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryGraph {
    edges: Mutex<Vec<(Uuid, Uuid)>>,
    posts: Mutex<Vec<Post>>,
    /// Number of two-hop neighborhood fetches served.
    pub network_fetches: AtomicUsize,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.lock().unwrap().len()
    }

    pub fn network_fetch_count(&self) -> usize {
        self.network_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphRepository for InMemoryGraph {
    async fn create_follow(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool> {
        let mut edges = self.edges.lock().unwrap();
        if edges.contains(&(follower_id, following_id)) {
            return Ok(false);
        }
        edges.push((follower_id, following_id));
        Ok(true)
    }

    async fn delete_follow(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool> {
        let mut edges = self.edges.lock().unwrap();
        let before = edges.len();
        edges.retain(|edge| *edge != (follower_id, following_id));
        Ok(edges.len() < before)
    }

    async fn list_followers(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, to)| *to == user_id)
            .map(|(from, _)| *from)
            .collect())
    }

    async fn list_following(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(from, _)| *from == user_id)
            .map(|(_, to)| *to)
            .collect())
    }

    async fn following_network(&self, user_id: Uuid) -> Result<Vec<FollowingNetwork>> {
        self.network_fetches.fetch_add(1, Ordering::SeqCst);

        let edges = self.edges.lock().unwrap();
        let network = edges
            .iter()
            .filter(|(from, _)| *from == user_id)
            .map(|(_, followed)| FollowingNetwork {
                following_id: *followed,
                their_following: edges
                    .iter()
                    .filter(|(from, _)| from == followed)
                    .map(|(_, to)| *to)
                    .collect(),
            })
            .collect();

        Ok(network)
    }

    async fn insert_post(
        &self,
        author_id: Uuid,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<Post> {
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            content: content.to_string(),
            image_url: image_url.map(str::to_string),
            created_at: Utc::now(),
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn list_posts_desc(&self) -> Result<Vec<Post>> {
        // Insertion order reversed = created_at descending, newest-first
        // on ties.
        Ok(self.posts.lock().unwrap().iter().rev().cloned().collect())
    }
}
