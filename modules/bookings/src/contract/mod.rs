pub mod caller;
pub mod client;
pub mod error;
pub mod model;

pub use caller::{CallerContext, CallerIdentity, ManagementToken, ProfileSyncGrant};
pub use client::BookingsApi;
pub use error::BookingsError;
pub use model::{
    Appointment, AppointmentPatch, Barber, BarberPatch, NewAppointment, NewBarber, PersonName,
    ServiceName,
};
