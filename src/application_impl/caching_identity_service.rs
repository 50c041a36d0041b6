use crate::application_port::{IdentityService, ResolveError};
use crate::domain_model::IdentityRecord;
use crate::domain_port::IdentityCache;
use crate::logger::*;
use std::sync::Arc;

/// Fronts an [`IdentityService`] with a cache of successes and failures.
///
/// The caller that triggers a failed resolution sees the real error. Every
/// later caller sees [`ResolveError::CachedFailure`] until the cache drops the
/// entry.
///
/// Check, resolve and write-back are not synchronized. Concurrent misses for
/// the same user each hit the directory and the last write wins.
pub struct CachingIdentityService {
    cache: Arc<dyn IdentityCache>,
    resolver: Arc<dyn IdentityService>,
}

impl CachingIdentityService {
    pub fn new(cache: Arc<dyn IdentityCache>, resolver: Arc<dyn IdentityService>) -> Self {
        Self { cache, resolver }
    }
}

#[async_trait::async_trait]
impl IdentityService for CachingIdentityService {
    async fn resolve(&self, user: &str) -> Result<IdentityRecord, ResolveError> {
        match self.cache.get(user).await {
            Ok(Some(Some(record))) => {
                debug!(user, "cached hit");
                return Ok(record);
            }
            Ok(Some(None)) => {
                debug!(user, "cached failure");
                return Err(ResolveError::CachedFailure);
            }
            Ok(None) => debug!(user, "uncached user"),
            Err(e) => warn!(user, error = %e, "identity cache read failed, resolving uncached"),
        }

        let outcome = self.resolver.resolve(user).await;
        if let Err(e) = &outcome {
            warn!(user, error = %e, "identity resolution failed");
        }

        if let Err(e) = self.cache.put(user, outcome.as_ref().ok().cloned()).await {
            warn!(user, error = %e, "identity cache write failed");
        }
        outcome
    }
}
