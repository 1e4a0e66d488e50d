use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} ID is invalid: '{value}'")]
    InvalidId { entity: &'static str, value: String },

    #[error("Barber ID is invalid: {id}")]
    UnknownBarberReference { id: Uuid },

    #[error("Invalid date '{value}', expected yyyy-mm-dd")]
    InvalidDate { value: String },

    #[error("Invalid date-time '{value}', expected ISO-8601")]
    InvalidDateTime { value: String },

    #[error("A barber with email '{email}' is already registered")]
    EmailAlreadyRegistered { email: String },

    #[error("Appointment not found: {id}")]
    AppointmentNotFound { id: Uuid },

    #[error("Barber not found")]
    BarberNotFound,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Identity provider sync failed: {message}")]
    IdentitySync { message: String },
}

impl DomainError {
    pub fn invalid_id(entity: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidId {
            entity,
            value: value.into(),
        }
    }

    pub fn unknown_barber_reference(id: Uuid) -> Self {
        Self::UnknownBarberReference { id }
    }

    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    pub fn invalid_date_time(value: impl Into<String>) -> Self {
        Self::InvalidDateTime {
            value: value.into(),
        }
    }

    pub fn email_already_registered(email: impl Into<String>) -> Self {
        Self::EmailAlreadyRegistered {
            email: email.into(),
        }
    }

    pub fn appointment_not_found(id: Uuid) -> Self {
        Self::AppointmentNotFound { id }
    }

    pub fn barber_not_found() -> Self {
        Self::BarberNotFound
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn identity_sync(message: impl Into<String>) -> Self {
        Self::IdentitySync {
            message: message.into(),
        }
    }
}
