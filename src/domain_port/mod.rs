mod directory;
mod identity_cache;

pub use directory::*;
pub use identity_cache::*;
