//! "People you may know": second-degree candidates over the follow
//! graph, served cache-aside.
//!
//! The traversal and filtering are pure functions over the fetched
//! edge lists; all I/O happens in one joined repository query and the
//! surrounding cache calls.

use crate::cache::{keys, CacheStore};
use crate::error::Result;
use crate::models::FollowingNetwork;
use crate::repository::GraphRepository;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct RecommendationEngine {
    graph: Arc<dyn GraphRepository>,
    cache: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl RecommendationEngine {
    pub fn new(graph: Arc<dyn GraphRepository>, cache: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { graph, cache, ttl }
    }

    /// Recommended user ids for `user_id`, in deterministic traversal
    /// order (followings by edge age, then each of their followings by
    /// edge age).
    ///
    /// A corrupt cache entry is deleted and treated as a miss; a cache
    /// read failure degrades to a miss. GraphStore failures propagate.
    pub async fn recommended_users(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let key = keys::recommended_users(user_id);

        match self.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Uuid>>(&raw) {
                Ok(ids) => {
                    debug!(user = %user_id, "cache hit for recommendations");
                    return Ok(ids);
                }
                Err(err) => {
                    warn!(user = %user_id, error = %err, "corrupt recommendation cache entry, discarding");
                    if let Err(err) = self.cache.del(&key).await {
                        warn!(user = %user_id, error = %err, "failed to delete corrupt recommendation entry");
                    }
                }
            },
            Ok(None) => debug!(user = %user_id, "cache miss for recommendations"),
            Err(err) => {
                warn!(user = %user_id, error = %err, "recommendation cache unavailable, falling through")
            }
        }

        let network = self.graph.following_network(user_id).await?;
        let ids = second_degree_candidates(user_id, &network);

        // Empty sets are not cached: a user with no recommendations is
        // recomputed on every request until the graph changes.
        if !ids.is_empty() {
            match serde_json::to_string(&ids) {
                Ok(json) => {
                    if let Err(err) = self.cache.set_ex(&key, &json, self.ttl).await {
                        warn!(user = %user_id, error = %err, "failed to cache recommendations");
                    }
                }
                Err(err) => {
                    warn!(user = %user_id, error = %err, "failed to serialize recommendations")
                }
            }
        }

        Ok(ids)
    }

    /// Drop the cached set so the next read recomputes from the graph.
    pub async fn invalidate(&self, user_id: Uuid) -> Result<()> {
        self.cache.del(&keys::recommended_users(user_id)).await
    }
}

/// Filter the two-hop neighborhood down to recommendation candidates,
/// in first-seen traversal order: drop the requester, drop anyone the
/// requester already follows, and emit each surviving id once.
pub fn second_degree_candidates(user_id: Uuid, network: &[FollowingNetwork]) -> Vec<Uuid> {
    let direct: HashSet<Uuid> = network.iter().map(|n| n.following_id).collect();
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for hop in network {
        for &candidate in &hop.their_following {
            if candidate == user_id || direct.contains(&candidate) {
                continue;
            }
            if seen.insert(candidate) {
                candidates.push(candidate);
            }
        }
    }

    candidates
}
