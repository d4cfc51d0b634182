//! Redis cache for LLM extraction responses
//!
//! Owned by the claim-extraction collaborator, never by the scoring core:
//! the core is pure and carries no shared mutable state. Keys are derived
//! from résumé content hashes, so identical text never pays for a second
//! extraction round-trip within the TTL window.

use std::env;

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};

// Environment variable names
const ENV_REDIS_HOST: &str = "RESUME_INTEL_REDIS_HOST";
const ENV_REDIS_PORT: &str = "RESUME_INTEL_REDIS_PORT";
const ENV_REDIS_PASSWORD: &str = "RESUME_INTEL_REDIS_PASSWORD";
const ENV_REDIS_DB: &str = "RESUME_INTEL_REDIS_DB";
const ENV_CACHE_TTL: &str = "RESUME_INTEL_CACHE_TTL";

// Default values
const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
const DEFAULT_REDIS_PORT: &str = "6379";
const DEFAULT_REDIS_DB: &str = "0";

// Extracted claims are content-addressed, so entries stay valid for as long
// as we care to keep them; default to 7 days
const DEFAULT_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Cache miss for key: {0}")]
    Miss(String),
}

// Cache key prefix
const PREFIX_CLAIMS: &str = "claims:";

/// Redis-based cache for extraction responses
#[derive(Clone)]
pub struct ExtractionCache {
    client: Client,
    ttl_seconds: u64,
}

impl ExtractionCache {
    /// Create a new cache instance and verify connection
    ///
    /// Configuration via environment variables:
    /// - `RESUME_INTEL_REDIS_HOST` - Redis host (default: 127.0.0.1)
    /// - `RESUME_INTEL_REDIS_PORT` - Redis port (default: 6379)
    /// - `RESUME_INTEL_REDIS_PASSWORD` - Redis password (default: none)
    /// - `RESUME_INTEL_REDIS_DB` - Redis database number (default: 0)
    /// - `RESUME_INTEL_CACHE_TTL` - Cache TTL in seconds (default: 7 days)
    pub async fn new() -> Result<Self, CacheError> {
        let host = env::var(ENV_REDIS_HOST).unwrap_or_else(|_| DEFAULT_REDIS_HOST.to_string());
        let port = env::var(ENV_REDIS_PORT).unwrap_or_else(|_| DEFAULT_REDIS_PORT.to_string());
        let password = env::var(ENV_REDIS_PASSWORD).ok();
        let db = env::var(ENV_REDIS_DB).unwrap_or_else(|_| DEFAULT_REDIS_DB.to_string());

        let ttl_seconds = env::var(ENV_CACHE_TTL)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TTL_SECONDS);

        // Build Redis URL: redis://[password@]host:port/db
        let redis_url = match password {
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        tracing::debug!(host = %host, port = %port, db = %db, "Connecting to Redis");

        let client = Client::open(redis_url)?;

        // Test the connection by pinging Redis
        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        tracing::info!(host = %host, port = %port, "Redis connection established");

        Ok(Self {
            client,
            ttl_seconds,
        })
    }

    /// Get cached extracted claims by résumé content hash
    pub async fn get_claims<T: DeserializeOwned>(&self, content_hash: &str) -> Result<T, CacheError> {
        self.get_with_prefix(PREFIX_CLAIMS, content_hash).await
    }

    /// Cache extracted claims by résumé content hash
    pub async fn set_claims<T: Serialize>(
        &self,
        content_hash: &str,
        data: &T,
    ) -> Result<(), CacheError> {
        self.set_with_prefix(PREFIX_CLAIMS, content_hash, data).await
    }

    async fn get_with_prefix<T: DeserializeOwned>(
        &self,
        prefix: &str,
        key: &str,
    ) -> Result<T, CacheError> {
        let full_key = format!("{}{}", prefix, key);
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let data: Option<String> = conn.get(&full_key).await?;

        match data {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| CacheError::Serialization(e.to_string()))
            }
            None => Err(CacheError::Miss(key.to_string())),
        }
    }

    async fn set_with_prefix<T: Serialize>(
        &self,
        prefix: &str,
        key: &str,
        data: &T,
    ) -> Result<(), CacheError> {
        let full_key = format!("{}{}", prefix, key);
        let json =
            serde_json::to_string(data).map_err(|e| CacheError::Serialization(e.to_string()))?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(&full_key, json, self.ttl_seconds).await?;

        tracing::debug!(key = %full_key, ttl = self.ttl_seconds, "Cached data");
        Ok(())
    }
}
