use serde::{Deserialize, Serialize};

use crate::contract::caller::ManagementToken;

/// Configuration for the bookings module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BookingsConfig {
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,
    /// Serve GraphiQL on GET at `graphql_path`.
    #[serde(default = "default_playground")]
    pub playground: bool,
    #[serde(default)]
    pub identity_provider: Option<IdentityProviderConfig>,
}

/// Management API access for profile sync. Without it `updateBarber` is always refused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct IdentityProviderConfig {
    /// Base URL, e.g. `https://tenant.eu.auth0.com`.
    pub domain: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub access_token: String,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

impl IdentityProviderConfig {
    pub fn management(&self) -> (ManagementToken, String) {
        (
            ManagementToken {
                token_type: self.token_type.clone(),
                access_token: self.access_token.clone(),
            },
            self.domain.clone(),
        )
    }
}

impl Default for BookingsConfig {
    fn default() -> Self {
        Self {
            graphql_path: default_graphql_path(),
            playground: default_playground(),
            identity_provider: None,
        }
    }
}

fn default_graphql_path() -> String {
    "/graphql".to_string()
}

fn default_playground() -> bool {
    true
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

fn default_timeout_sec() -> u64 {
    10
}
