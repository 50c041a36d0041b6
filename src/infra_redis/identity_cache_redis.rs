use crate::domain_model::CachedIdentity;
use crate::domain_port::{CacheError, IdentityCache};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

/// Identity cache shared between instances through Redis.
///
/// Values are the JSON form of `Option<IdentityRecord>`, so a recorded
/// failure is stored as `null`. Expiry is handled by Redis via `SET EX`.
pub struct RedisIdentityCache {
    conn: ConnectionManager,
    prefix: String,
    ttl_secs: Option<u64>,
}

impl RedisIdentityCache {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>, ttl_secs: Option<u64>) -> Self {
        RedisIdentityCache {
            conn,
            prefix: prefix.into(),
            ttl_secs,
        }
    }

    fn key(&self, user: &str) -> String {
        format!("{}:{}", self.prefix, user)
    }
}

fn encode(value: &CachedIdentity) -> Result<String, CacheError> {
    serde_json::to_string(value).map_err(|e| CacheError::Codec(e.to_string()))
}

fn decode(raw: &str) -> Result<CachedIdentity, CacheError> {
    serde_json::from_str(raw).map_err(|e| CacheError::Codec(e.to_string()))
}

#[async_trait::async_trait]
impl IdentityCache for RedisIdentityCache {
    async fn get(&self, user: &str) -> Result<Option<CachedIdentity>, CacheError> {
        let key = self.key(user);
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| CacheError::Store(e.to_string()))?;
        raw.as_deref().map(decode).transpose()
    }

    async fn put(&self, user: &str, value: CachedIdentity) -> Result<(), CacheError> {
        let key = self.key(user);
        let payload = encode(&value)?;
        let mut conn = self.conn.clone();
        let written: redis::RedisResult<()> = match self.ttl_secs {
            Some(ttl) => conn.set_ex(&key, payload, ttl).await,
            None => conn.set(&key, payload).await,
        };
        written.map_err(|e| CacheError::Store(e.to_string()))
    }
}
