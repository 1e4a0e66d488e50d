//! Per-request caller context.
//!
//! Built by the transport adapter for every request and handed explicitly to
//! each resolver. Nothing here is persisted.

/// Permission allowing a barber to read customer contact data on appointments.
pub const READ_APPOINTMENTS_DATA: &str = "read:appointments_data";
/// Permission allowing a barber to read their own e-mail on the barber record.
pub const READ_BARBER_DATA: &str = "read:barber_data";
/// Permission allowing barber profile updates (admin only).
pub const UPDATE_BARBER: &str = "update:barber";

/// Authenticated identity as asserted by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub id: String,
    pub email: String,
    pub permissions: Vec<String>,
}

impl CallerIdentity {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Machine-to-machine credential for the identity provider's management API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementToken {
    pub token_type: String,
    pub access_token: String,
}

impl ManagementToken {
    /// Value for the `authorization` header, e.g. `Bearer abc`.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    pub identity: Option<CallerIdentity>,
    pub management_token: Option<ManagementToken>,
    pub provider_domain: Option<String>,
}

impl CallerContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_identity(mut self, identity: CallerIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_management(mut self, token: ManagementToken, domain: impl Into<String>) -> Self {
        self.management_token = Some(token);
        self.provider_domain = Some(domain.into());
        self
    }

    /// False for anonymous callers.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.identity
            .as_ref()
            .is_some_and(|i| i.has_permission(permission))
    }
}

/// Everything needed to push a profile change to the identity provider,
/// handed out only after the caller passed the barber-update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSyncGrant {
    pub user_id: String,
    pub token: ManagementToken,
    pub domain: String,
}
