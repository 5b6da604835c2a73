//! Key-value cache with expiring entries.
//!
//! The Redis backend probes connectivity once at construction and never
//! reconnects; a failed probe degrades every operation to always-miss.
//! `CacheManager` is the boundary the rest of the crate talks to: it fully
//! absorbs cache errors so a broken store can never fail a request.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info, warn};

pub mod keys;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("Cache store unavailable")]
    Unavailable,
}

/// Observability snapshot of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub store_type: String,
    pub connected: bool,
    pub keys: u64,
    pub memory_usage: String,
    pub uptime_secs: u64,
}

impl CacheStats {
    fn disconnected(store_type: &str) -> Self {
        Self {
            store_type: store_type.to_string(),
            connected: false,
            keys: 0,
            memory_usage: "n/a".to_string(),
            uptime_secs: 0,
        }
    }
}

#[async_trait::async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    /// ttl is mandatory: every entry expires.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
    async fn stats(&self) -> CacheStats;
}

/// Redis-backed store.
pub struct RedisCache {
    client: Option<redis::Client>,
    connected: bool,
}

impl RedisCache {
    /// Opens a client and probes it with PING exactly once. A failed probe
    /// yields a permanently disconnected instance rather than an error.
    pub async fn connect(redis_url: &str) -> Self {
        let client = match redis::Client::open(redis_url) {
            Ok(client) => client,
            Err(e) => {
                error!("Invalid Redis URL: {}", e);
                return Self {
                    client: None,
                    connected: false,
                };
            }
        };

        match client.get_async_connection().await {
            Ok(mut conn) => match redis::cmd("PING").query_async::<_, String>(&mut conn).await {
                Ok(_) => {
                    info!("Connected to Redis");
                    Self {
                        client: Some(client),
                        connected: true,
                    }
                }
                Err(e) => {
                    error!("Redis ping failed: {}", e);
                    Self {
                        client: Some(client),
                        connected: false,
                    }
                }
            },
            Err(e) => {
                error!("Failed to connect to Redis: {}", e);
                Self {
                    client: Some(client),
                    connected: false,
                }
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn client(&self) -> Result<&redis::Client, CacheError> {
        if !self.connected {
            return Err(CacheError::Unavailable);
        }
        self.client.as_ref().ok_or(CacheError::Unavailable)
    }
}

#[async_trait::async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.client()?.get_async_connection().await?;
        let result: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.client()?.get_async_connection().await?;
        redis::cmd("SETEX")
            .arg(key)
            .arg(ttl.as_secs())
            .arg(value)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.client()?.get_async_connection().await?;
        redis::cmd("DEL")
            .arg(key)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        let client = match self.client() {
            Ok(client) => client,
            Err(_) => return CacheStats::disconnected("Redis"),
        };

        let mut conn = match client.get_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Redis stats connection failed: {}", e);
                return CacheStats::disconnected("Redis");
            }
        };

        let keys: u64 = redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .unwrap_or(0);
        let info: String = redis::cmd("INFO")
            .query_async(&mut conn)
            .await
            .unwrap_or_default();

        CacheStats {
            store_type: "Redis".to_string(),
            connected: true,
            keys,
            memory_usage: parse_info_field(&info, "used_memory_human")
                .unwrap_or_else(|| "n/a".to_string()),
            uptime_secs: parse_info_field(&info, "uptime_in_seconds")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

/// Extracts `field:value` from a Redis INFO payload.
fn parse_info_field(info: &str, field: &str) -> Option<String> {
    info.lines()
        .find_map(|line| line.strip_prefix(field)?.strip_prefix(':').map(str::trim))
        .map(|v| v.to_string())
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-memory store used as a fallback and in tests.
#[derive(Debug, Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<HashMap<String, CacheEntry>>>,
    started_at: Instant,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            started_at: Instant::now(),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CacheBackend for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let expired = {
            let store = self.store.read().unwrap();
            match store.get(key) {
                Some(entry) if Instant::now() > entry.expires_at => true,
                Some(entry) => return Ok(Some(entry.value.clone())),
                None => return Ok(None),
            }
        };
        if expired {
            self.store.write().unwrap().remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut store = self.store.write().unwrap();
        store.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().unwrap().remove(key);
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let keys = self
            .store
            .read()
            .unwrap()
            .values()
            .filter(|e| e.expires_at > now)
            .count() as u64;

        CacheStats {
            store_type: "InMemory".to_string(),
            connected: true,
            keys,
            memory_usage: "n/a".to_string(),
            uptime_secs: self.started_at.elapsed().as_secs(),
        }
    }
}

/// Typed JSON facade over a backend. All cache errors stop here: a failed get
/// reads as a miss, a failed set/delete reads as `false`. Callers can always
/// proceed against the repository.
#[derive(Clone)]
pub struct CacheManager {
    backend: Arc<dyn CacheBackend>,
}

impl CacheManager {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(CacheError::Unavailable) => return None,
            Err(e) => {
                warn!(key = %key, "Cache get failed: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                // A stale or foreign payload reads as a miss, never an error.
                warn!(key = %key, "Cache payload failed to deserialize: {}", e);
                None
            }
        }
    }

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, "Cache serialization failed: {}", e);
                return false;
            }
        };

        match self.backend.set(key, &raw, ttl).await {
            Ok(()) => true,
            Err(CacheError::Unavailable) => false,
            Err(e) => {
                warn!(key = %key, "Cache set failed: {}", e);
                false
            }
        }
    }

    pub async fn delete(&self, key: &str) -> bool {
        match self.backend.delete(key).await {
            Ok(()) => true,
            Err(CacheError::Unavailable) => false,
            Err(e) => {
                warn!(key = %key, "Cache delete failed: {}", e);
                false
            }
        }
    }

    pub async fn stats(&self) -> CacheStats {
        self.backend.stats().await
    }

    pub async fn is_connected(&self) -> bool {
        self.backend.stats().await.connected
    }
}
