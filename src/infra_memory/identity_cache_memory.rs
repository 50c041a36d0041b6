use crate::domain_model::CachedIdentity;
use crate::domain_port::{CacheError, IdentityCache};
use dashmap::DashMap;
use std::time::{Duration, Instant};

struct Slot {
    value: CachedIdentity,
    stored_at: Instant,
}

/// Process-local identity cache. Entries live until `ttl` passes or they are removed.
pub struct MemoryIdentityCache {
    entries: DashMap<String, Slot>,
    ttl: Option<Duration>,
}

impl MemoryIdentityCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        MemoryIdentityCache {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn remove(&self, user: &str) -> bool {
        self.entries.remove(user).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn expired(&self, slot: &Slot) -> bool {
        self.ttl
            .is_some_and(|ttl| slot.stored_at.elapsed() >= ttl)
    }
}

#[async_trait::async_trait]
impl IdentityCache for MemoryIdentityCache {
    async fn get(&self, user: &str) -> Result<Option<CachedIdentity>, CacheError> {
        if let Some(slot) = self.entries.get(user) {
            if !self.expired(&slot) {
                return Ok(Some(slot.value.clone()));
            }
        }
        self.entries.remove_if(user, |_, slot| self.expired(slot));
        Ok(None)
    }

    async fn put(&self, user: &str, value: CachedIdentity) -> Result<(), CacheError> {
        self.entries.insert(
            user.to_string(),
            Slot {
                value,
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }
}
