use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    caller::ProfileSyncGrant,
    client::BookingsApi,
    error::BookingsError,
    model::{Appointment, AppointmentPatch, Barber, BarberPatch, NewAppointment, NewBarber},
};
use crate::domain::service::Service;

/// Local implementation of the BookingsApi trait that delegates to the domain service
pub struct BookingsLocalClient {
    service: Arc<Service>,
}

impl BookingsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl BookingsApi for BookingsLocalClient {
    async fn list_appointments(
        &self,
        barber_id: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<Appointment>, BookingsError> {
        self.service
            .list_appointments(barber_id, date)
            .await
            .map_err(Into::into)
    }

    async fn get_appointment(
        &self,
        appointment_id: &str,
    ) -> Result<Option<Appointment>, BookingsError> {
        self.service
            .get_appointment(appointment_id)
            .await
            .map_err(Into::into)
    }

    async fn list_barbers(&self, date_time: Option<&str>) -> Result<Vec<Barber>, BookingsError> {
        self.service.list_barbers(date_time).await.map_err(Into::into)
    }

    async fn get_barber(
        &self,
        barber_id: Option<&str>,
        email: Option<&str>,
    ) -> Result<Barber, BookingsError> {
        self.service
            .get_barber(barber_id, email)
            .await
            .map_err(Into::into)
    }

    async fn create_appointment(&self, new: NewAppointment) -> Result<Appointment, BookingsError> {
        self.service.create_appointment(new).await.map_err(Into::into)
    }

    async fn create_barber(&self, new: NewBarber) -> Result<Barber, BookingsError> {
        self.service.create_barber(new).await.map_err(Into::into)
    }

    async fn update_appointment(
        &self,
        appointment_id: &str,
        patch: AppointmentPatch,
    ) -> Result<Appointment, BookingsError> {
        self.service
            .update_appointment(appointment_id, patch)
            .await
            .map_err(Into::into)
    }

    async fn update_barber(
        &self,
        barber_id: &str,
        patch: BarberPatch,
    ) -> Result<Barber, BookingsError> {
        self.service
            .update_barber(barber_id, patch)
            .await
            .map_err(Into::into)
    }

    async fn sync_identity_profile(
        &self,
        grant: &ProfileSyncGrant,
        barber: &Barber,
    ) -> Result<(), BookingsError> {
        self.service
            .sync_identity_profile(grant, barber)
            .await
            .map_err(Into::into)
    }
}
