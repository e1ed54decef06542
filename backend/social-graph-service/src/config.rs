/// Configuration management for social-graph-service
///
/// Loads configuration from environment variables.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Redis configuration
    pub redis: RedisConfig,
    /// Cache TTLs and rate-limit windows
    pub cache: CacheConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port
    pub http_port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis URL (redis://host:port)
    pub url: String,
}

/// Cache TTLs and rate-limit cooldowns, all in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Recommended-users cache TTL (1 hour)
    pub recommendation_ttl: u64,
    /// Global feed cache TTL (5 minutes)
    pub feed_ttl: u64,
    /// Cooldown between posts from the same user
    pub post_cooldown: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            recommendation_ttl: 3600, // 1 hour
            feed_ttl: 300,            // 5 minutes
            post_cooldown: 10,
        }
    }
}

fn default_max_connections() -> u32 {
    20
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8010),
        };

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL environment variable not set")?,
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_max_connections),
        };

        let redis = RedisConfig {
            url: std::env::var("REDIS_URL")
                .context("REDIS_URL environment variable not set")?,
        };

        let defaults = CacheConfig::default();
        let cache = CacheConfig {
            recommendation_ttl: env_u64("RECOMMENDATION_TTL_SECONDS", defaults.recommendation_ttl),
            feed_ttl: env_u64("FEED_TTL_SECONDS", defaults.feed_ttl),
            post_cooldown: env_u64("POST_COOLDOWN_SECONDS", defaults.post_cooldown),
        };

        Ok(Config {
            app,
            database,
            redis,
            cache,
        })
    }
}
