use async_graphql::{Error, ErrorExtensions};

use crate::contract::error::BookingsError;
use crate::domain::error::DomainError;

pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

impl BookingsError {
    pub fn graphql_code(&self) -> &'static str {
        match self {
            BookingsError::Unauthorized => UNAUTHENTICATED,
            BookingsError::InvalidInput { .. } => BAD_USER_INPUT,
            BookingsError::NotFound { .. } => NOT_FOUND,
            BookingsError::IdentitySync { .. } | BookingsError::Internal => INTERNAL_SERVER_ERROR,
        }
    }
}

impl ErrorExtensions for BookingsError {
    fn extend(&self) -> Error {
        if let BookingsError::IdentitySync { message } = self {
            tracing::warn!(%message, "Identity provider sync failed");
        }
        let code = self.graphql_code();
        Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

/// Shorthand for `map_err` at resolver boundaries.
pub(crate) fn gql(e: BookingsError) -> Error {
    e.extend()
}

/// Input validation done in the resolver itself (e.g. date arguments).
pub(crate) fn gql_domain(e: DomainError) -> Error {
    BookingsError::from(e).extend()
}
