//! Cache key builders.
//!
//! Key shapes:
//! - RECOMMENDED_USERS:{user_id} → serialized Vec<Uuid>
//! - RATE_LIMIT:{ACTION}:{user_id} → "1" with TTL = cooldown
//! - ALL_POSTS → serialized Vec<Post> (single global key)
//! - USER_PROFILE:{user_id} → reserved for per-user profile caching

use uuid::Uuid;

/// The single shared key for the global timeline.
pub const ALL_POSTS: &str = "ALL_POSTS";

pub fn recommended_users(user_id: Uuid) -> String {
    format!("RECOMMENDED_USERS:{}", user_id)
}

pub fn rate_limit(action: &str, user_id: Uuid) -> String {
    format!("RATE_LIMIT:{}:{}", action, user_id)
}

/// Placeholder for future per-user profile caching; nothing writes it
/// yet, but mutations already invalidate it.
pub fn user_profile(user_id: Uuid) -> String {
    format!("USER_PROFILE:{}", user_id)
}
