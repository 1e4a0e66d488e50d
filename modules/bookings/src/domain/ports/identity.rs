use async_trait::async_trait;

use crate::contract::caller::ProfileSyncGrant;
use crate::domain::error::DomainError;

/// Profile fields mirrored to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub picture: Option<String>,
}

/// Transport-agnostic port for the identity provider's user-management API.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn patch_user_profile(
        &self,
        grant: &ProfileSyncGrant,
        update: &ProfileUpdate,
    ) -> Result<(), DomainError>;
}
