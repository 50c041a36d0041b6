mod identity_cache_memory;

pub use identity_cache_memory::*;
