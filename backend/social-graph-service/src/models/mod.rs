/// Data models for social-graph-service
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post in the global timeline.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One directly-followed user together with the users they follow,
/// both in edge-creation order. Projection of the single joined
/// two-hop query behind "people you may know".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowingNetwork {
    pub following_id: Uuid,
    pub their_following: Vec<Uuid>,
}
