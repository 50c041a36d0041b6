use crate::domain_model::CachedIdentity;

/// Resolution outcomes keyed by user identifier.
///
/// `get` returns `None` when there is no entry and `Some(None)` for a
/// recorded failure. Expiry and eviction are up to the implementation.
#[async_trait::async_trait]
pub trait IdentityCache: Send + Sync {
    async fn get(&self, user: &str) -> Result<Option<CachedIdentity>, CacheError>;

    async fn put(&self, user: &str, value: CachedIdentity) -> Result<(), CacheError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("infra error: {0}")]
    Store(String),
    #[error("codec error: {0}")]
    Codec(String),
}
