//! Redis-backed key-value cache layer.
//!
//! Every cached value is a disposable projection of the database:
//! losing the whole cache costs latency, never correctness. The
//! `CacheStore` trait is the seam the services depend on, so tests can
//! swap in an in-memory store.

pub mod keys;

use crate::error::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Narrow key-value interface over the networked cache.
///
/// Values are JSON strings; no cross-key transactionality is assumed.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a value, `None` on miss.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value with an expiry.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Delete a key. Deleting a missing key is a no-op, never an error.
    async fn del(&self, key: &str) -> Result<()>;
}

/// Production `CacheStore` over a Redis connection manager.
#[derive(Clone)]
pub struct RedisCacheStore {
    manager: Arc<ConnectionManager>,
}

impl RedisCacheStore {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        Ok(Self {
            manager: Arc::new(manager),
        })
    }

    pub fn new(manager: Arc<ConnectionManager>) -> Self {
        Self { manager }
    }

    /// Ping Redis to check connection health.
    pub async fn ping(&self) -> Result<()> {
        let _: String = redis::cmd("PING")
            .query_async(&mut self.manager.as_ref().clone())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.manager.as_ref().clone())
            .await?;

        debug!(key, hit = value.is_some(), "cache get");
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        redis::cmd("SETEX")
            .arg(key)
            .arg(ttl.as_secs())
            .arg(value)
            .query_async::<_, ()>(&mut self.manager.as_ref().clone())
            .await?;

        debug!(key, ttl_secs = ttl.as_secs(), "cache set");
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async::<_, ()>(&mut self.manager.as_ref().clone())
            .await?;

        debug!(key, "cache del");
        Ok(())
    }
}
