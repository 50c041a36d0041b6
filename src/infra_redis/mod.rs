mod identity_cache_redis;

pub use identity_cache_redis::*;
