use crate::application_port::{IdentityService, ResolveError};
use crate::domain_model::IdentityRecord;

/// Canned identities for running the service without a directory.
///
/// `alice` resolves, `twins` is ambiguous, `partial` lacks details and every
/// other identifier is unknown.
#[derive(Debug, Default)]
pub struct FakeIdentityService;

impl FakeIdentityService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl IdentityService for FakeIdentityService {
    async fn resolve(&self, user: &str) -> Result<IdentityRecord, ResolveError> {
        match user {
            "alice" => Ok(IdentityRecord::new(
                "Alice Example".to_string(),
                "alice".to_string(),
                "alice@example.org".to_string(),
                vec!["staff".to_string(), "vpn".to_string()],
            )),
            "twins" => Err(ResolveError::TooManyUsers),
            "partial" => Err(ResolveError::MissingDetails),
            _ => Err(ResolveError::MissingUser),
        }
    }
}
