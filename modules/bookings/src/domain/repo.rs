use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::{Appointment, Barber};

/// Criteria for listing appointments. Time bounds are `[time_from, time_before)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub barber_id: Option<Uuid>,
    pub time_from: Option<DateTime<Utc>>,
    pub time_before: Option<DateTime<Utc>>,
}

/// A barber with its reference list expanded into full records.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedBarber {
    pub barber: Barber,
    /// Reference-list order; dangling references are absent.
    pub appointments: Vec<Appointment>,
}

/// Port for the domain layer: persistence operations the domain needs.
#[async_trait]
pub trait BookingsRepository: Send + Sync {
    /// Matching appointments sorted ascending by time.
    async fn find_appointments(&self, filter: &AppointmentFilter)
        -> anyhow::Result<Vec<Appointment>>;
    async fn find_appointment(&self, id: Uuid) -> anyhow::Result<Option<Appointment>>;
    async fn insert_appointment(&self, appointment: Appointment) -> anyhow::Result<()>;
    async fn update_appointment(&self, appointment: Appointment) -> anyhow::Result<()>;

    async fn list_barbers(&self) -> anyhow::Result<Vec<Barber>>;
    async fn find_barber(&self, id: Uuid) -> anyhow::Result<Option<Barber>>;
    async fn find_barber_by_email(&self, email: &str) -> anyhow::Result<Option<Barber>>;
    async fn insert_barber(&self, barber: Barber) -> anyhow::Result<()>;
    /// Writes profile fields only; the appointment reference list is left untouched.
    async fn update_barber(&self, barber: Barber) -> anyhow::Result<()>;
    /// Append to the barber's reference list. Returns false when the barber is gone.
    async fn push_appointment_ref(&self, barber_id: Uuid, appointment_id: Uuid)
        -> anyhow::Result<bool>;

    /// Expand every barber's reference list, loading all referenced appointments in one query.
    async fn populate(&self, barbers: Vec<Barber>) -> anyhow::Result<Vec<PopulatedBarber>>;
}
