use crate::domain_model::IdentityRecord;
use crate::domain_port::DirectoryError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    #[error("user not found in directory")]
    MissingUser,
    #[error("more than one directory entry matches the user")]
    TooManyUsers,
    #[error("directory entry lacks cn, uid or mail")]
    MissingDetails,
    #[error("user failed to resolve earlier")]
    CachedFailure,
    #[error(transparent)]
    Transport(#[from] DirectoryError),
}

#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    async fn resolve(&self, user: &str) -> Result<IdentityRecord, ResolveError>;
}
