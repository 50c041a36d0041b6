mod caching_identity_service;
mod directory_identity_service;
mod identity_service_fake;

#[cfg(test)]
pub(crate) mod test_support;

pub use caching_identity_service::*;
pub use directory_identity_service::*;
pub use identity_service_fake::*;
