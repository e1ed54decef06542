//! Per-(user, action) cooldown windows backed by the cache.
//!
//! A window is a single key `RATE_LIMIT:{ACTION}:{user_id}` whose TTL
//! is the cooldown. `check` runs before the guarded mutation and
//! `consume` after it succeeds, so the window starts at
//! successful-completion time, not attempt time.
//!
//! Check and consume are two separate round-trips: two concurrent
//! requests from the same user can both pass `check` before either
//! consumes, producing two accepted writes within one window. An
//! atomic SET NX EX would make the first writer win instead, which
//! changes observable behavior, so the two-call shape is kept.

use crate::cache::{keys, CacheStore};
use crate::error::{AppError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Kinds of mutation guarded by a cooldown window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitAction {
    Post,
}

impl RateLimitAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitAction::Post => "POST",
        }
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    cache: Arc<dyn CacheStore>,
}

impl RateLimiter {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    /// Fail with `RateLimited` if a window is active for (user, action).
    pub async fn check(&self, action: RateLimitAction, user_id: Uuid) -> Result<()> {
        let key = keys::rate_limit(action.as_str(), user_id);
        if self.cache.get(&key).await?.is_some() {
            debug!(user = %user_id, action = action.as_str(), "rate-limit window active");
            return Err(AppError::RateLimited {
                action: action.as_str(),
            });
        }
        Ok(())
    }

    /// Start the cooldown window. Called only after the guarded
    /// mutation has committed.
    pub async fn consume(
        &self,
        action: RateLimitAction,
        user_id: Uuid,
        cooldown: Duration,
    ) -> Result<()> {
        let key = keys::rate_limit(action.as_str(), user_id);
        self.cache.set_ex(&key, "1", cooldown).await
    }

    /// Administrative reset: clear an active window before it expires.
    pub async fn reset(&self, action: RateLimitAction, user_id: Uuid) -> Result<()> {
        let key = keys::rate_limit(action.as_str(), user_id);
        self.cache.del(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_key_fragments_are_stable() {
        assert_eq!(RateLimitAction::Post.as_str(), "POST");
    }
}
