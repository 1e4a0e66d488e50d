use thiserror::Error;

/// Errors that are safe to expose to other modules and API callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingsError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Identity provider sync failed: {message}")]
    IdentitySync { message: String },

    #[error("Internal error")]
    Internal,
}

impl BookingsError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn identity_sync_failed(message: impl Into<String>) -> Self {
        Self::IdentitySync {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for BookingsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            e @ (InvalidId { .. }
            | UnknownBarberReference { .. }
            | InvalidDate { .. }
            | InvalidDateTime { .. }
            | EmailAlreadyRegistered { .. }) => Self::invalid_input(e.to_string()),
            e @ (AppointmentNotFound { .. } | BarberNotFound) => Self::not_found(e.to_string()),
            IdentitySync { message } => Self::IdentitySync { message },
            Database { message } => {
                tracing::error!(%message, "Database error occurred");
                Self::internal()
            }
        }
    }
}
