use async_trait::async_trait;

use crate::contract::{
    caller::ProfileSyncGrant,
    error::BookingsError,
    model::{Appointment, AppointmentPatch, Barber, BarberPatch, NewAppointment, NewBarber},
};

/// Public API trait for the bookings module that other modules can use.
///
/// Identifiers are taken as raw strings: a malformed one is an input error,
/// distinct from a well-formed identifier that matches nothing.
#[async_trait]
pub trait BookingsApi: Send + Sync {
    /// Appointments sorted by time, optionally narrowed to one barber and/or one UTC day (`yyyy-mm-dd`).
    async fn list_appointments(
        &self,
        barber_id: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<Appointment>, BookingsError>;

    /// `None` when the identifier is well-formed but unknown.
    async fn get_appointment(&self, appointment_id: &str)
        -> Result<Option<Appointment>, BookingsError>;

    /// All barbers, or only those free at the exact instant `date_time`.
    async fn list_barbers(&self, date_time: Option<&str>) -> Result<Vec<Barber>, BookingsError>;

    /// Lookup by id, else by email.
    async fn get_barber(
        &self,
        barber_id: Option<&str>,
        email: Option<&str>,
    ) -> Result<Barber, BookingsError>;

    async fn create_appointment(&self, new: NewAppointment) -> Result<Appointment, BookingsError>;

    async fn create_barber(&self, new: NewBarber) -> Result<Barber, BookingsError>;

    async fn update_appointment(
        &self,
        appointment_id: &str,
        patch: AppointmentPatch,
    ) -> Result<Appointment, BookingsError>;

    async fn update_barber(
        &self,
        barber_id: &str,
        patch: BarberPatch,
    ) -> Result<Barber, BookingsError>;

    /// Push the barber's display name and picture to the identity provider.
    async fn sync_identity_profile(
        &self,
        grant: &ProfileSyncGrant,
        barber: &Barber,
    ) -> Result<(), BookingsError>;
}
