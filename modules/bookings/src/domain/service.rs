use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::caller::ProfileSyncGrant;
use crate::contract::model::{
    Appointment, AppointmentPatch, Barber, BarberPatch, NewAppointment, NewBarber, PersonName,
};
use crate::domain::error::DomainError;
use crate::domain::ports::{IdentityProvider, ProfileUpdate};
use crate::domain::repo::{AppointmentFilter, BookingsRepository};
use crate::domain::time::{parse_instant, utc_day_bounds};

/// Data access service for barbers and appointments.
/// Depends only on the repository and identity ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn BookingsRepository>,
    identity: Arc<dyn IdentityProvider>,
}

fn parse_id(entity: &'static str, raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::invalid_id(entity, raw))
}

/// Empty arguments count as not supplied.
fn supplied(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

fn db(e: anyhow::Error) -> DomainError {
    DomainError::database(format!("{e:#}"))
}

impl Service {
    pub fn new(repo: Arc<dyn BookingsRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { repo, identity }
    }

    #[instrument(name = "bookings.service.list_appointments", skip(self))]
    pub async fn list_appointments(
        &self,
        barber_id: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<Appointment>, DomainError> {
        let mut filter = AppointmentFilter {
            barber_id: supplied(barber_id).map(|raw| parse_id("Barber", raw)).transpose()?,
            ..Default::default()
        };
        if let Some(date) = supplied(date) {
            let (start, end) = utc_day_bounds(date)?;
            filter.time_from = Some(start);
            filter.time_before = Some(end);
        }

        let items = self.repo.find_appointments(&filter).await.map_err(db)?;
        debug!(count = items.len(), "Listed appointments");
        Ok(items)
    }

    #[instrument(name = "bookings.service.get_appointment", skip(self))]
    pub async fn get_appointment(&self, appointment_id: &str) -> Result<Option<Appointment>, DomainError> {
        let id = parse_id("Appointment", appointment_id)?;
        self.repo.find_appointment(id).await.map_err(db)
    }

    /// All barbers, or with `date_time` only those without an appointment at that exact millisecond.
    #[instrument(name = "bookings.service.list_barbers", skip(self))]
    pub async fn list_barbers(&self, date_time: Option<&str>) -> Result<Vec<Barber>, DomainError> {
        let barbers = self.repo.list_barbers().await.map_err(db)?;
        let Some(raw) = supplied(date_time) else {
            return Ok(barbers);
        };

        let instant = parse_instant(raw)?.timestamp_millis();
        let populated = self.repo.populate(barbers).await.map_err(db)?;
        let free: Vec<Barber> = populated
            .into_iter()
            .filter(|p| {
                !p.appointments
                    .iter()
                    .any(|a| a.time.timestamp_millis() == instant)
            })
            .map(|p| p.barber)
            .collect();
        debug!(free = free.len(), "Filtered barbers by availability");
        Ok(free)
    }

    /// Looks up by id when given (no fallback to email), otherwise by email.
    #[instrument(name = "bookings.service.get_barber", skip(self))]
    pub async fn get_barber(
        &self,
        barber_id: Option<&str>,
        email: Option<&str>,
    ) -> Result<Barber, DomainError> {
        let found = match (supplied(barber_id), supplied(email)) {
            (Some(raw), _) => {
                let id = parse_id("Barber", raw)?;
                self.repo.find_barber(id).await.map_err(db)?
            }
            (None, Some(email)) => self.repo.find_barber_by_email(email).await.map_err(db)?,
            (None, None) => None,
        };
        found.ok_or_else(DomainError::barber_not_found)
    }

    #[instrument(
        name = "bookings.service.create_appointment",
        skip(self, new),
        fields(barber_id = %new.barber_id, time = %new.time)
    )]
    pub async fn create_appointment(&self, new: NewAppointment) -> Result<Appointment, DomainError> {
        info!("Creating appointment");

        let barber_id = parse_id("Barber", &new.barber_id)?;
        let time = parse_instant(&new.time)?;
        if self.repo.find_barber(barber_id).await.map_err(db)?.is_none() {
            return Err(DomainError::unknown_barber_reference(barber_id));
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            duration: new.duration,
            email: new.email,
            name: new.name,
            phone_number: new.phone_number,
            service_name: new.service_name,
            time,
            barber_id,
        };
        self.repo
            .insert_appointment(appointment.clone())
            .await
            .map_err(db)?;

        // Second write; a failure here leaves the appointment unlinked.
        let linked = self
            .repo
            .push_appointment_ref(barber_id, appointment.id)
            .await
            .map_err(db)?;
        if !linked {
            warn!(appointment_id = %appointment.id, "Barber vanished before the appointment was linked");
        }

        info!(appointment_id = %appointment.id, "Created appointment");
        Ok(appointment)
    }

    #[instrument(name = "bookings.service.create_barber", skip(self, new), fields(email = %new.email))]
    pub async fn create_barber(&self, new: NewBarber) -> Result<Barber, DomainError> {
        info!("Creating barber");

        if self
            .repo
            .find_barber_by_email(&new.email)
            .await
            .map_err(db)?
            .is_some()
        {
            return Err(DomainError::email_already_registered(new.email));
        }

        let barber = Barber {
            id: Uuid::new_v4(),
            name: new.name.unwrap_or_default(),
            email: new.email,
            profile_image_url: None,
            appointment_ids: Vec::new(),
        };
        self.repo.insert_barber(barber.clone()).await.map_err(db)?;

        info!(barber_id = %barber.id, "Created barber");
        Ok(barber)
    }

    #[instrument(name = "bookings.service.update_appointment", skip(self, patch))]
    pub async fn update_appointment(
        &self,
        appointment_id: &str,
        patch: AppointmentPatch,
    ) -> Result<Appointment, DomainError> {
        let id = parse_id("Appointment", appointment_id)?;
        let mut current = self
            .repo
            .find_appointment(id)
            .await
            .map_err(db)?
            .ok_or_else(|| DomainError::appointment_not_found(id))?;

        if let Some(raw) = patch.barber_id {
            current.barber_id = parse_id("Barber", &raw)?;
        }
        if let Some(time) = patch.time {
            current.time = parse_instant(&time)?;
        }
        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(full) = patch.full_name {
            current.name = PersonName::from_full_name(&full);
        }
        if let Some(email) = patch.email {
            current.email = email;
        }
        if let Some(phone) = patch.phone_number {
            current.phone_number = phone;
        }
        if let Some(duration) = patch.duration {
            current.duration = duration;
        }
        if let Some(service) = patch.service_name {
            current.service_name = service;
        }

        self.repo
            .update_appointment(current.clone())
            .await
            .map_err(db)?;
        debug!("Updated appointment");
        Ok(current)
    }

    #[instrument(name = "bookings.service.update_barber", skip(self, patch))]
    pub async fn update_barber(
        &self,
        barber_id: &str,
        patch: BarberPatch,
    ) -> Result<Barber, DomainError> {
        let id = parse_id("Barber", barber_id)?;
        let mut current = self
            .repo
            .find_barber(id)
            .await
            .map_err(db)?
            .ok_or_else(DomainError::barber_not_found)?;

        if let Some(email) = patch.email {
            if email != current.email {
                let taken = self
                    .repo
                    .find_barber_by_email(&email)
                    .await
                    .map_err(db)?
                    .is_some();
                if taken {
                    return Err(DomainError::email_already_registered(email));
                }
                current.email = email;
            }
        }
        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(url) = patch.profile_image_url {
            current.profile_image_url = Some(url);
        }

        self.repo.update_barber(current.clone()).await.map_err(db)?;
        debug!("Updated barber");
        Ok(current)
    }

    #[instrument(
        name = "bookings.service.sync_identity_profile",
        skip(self, grant, barber),
        fields(user_id = %grant.user_id, barber_id = %barber.id)
    )]
    pub async fn sync_identity_profile(
        &self,
        grant: &ProfileSyncGrant,
        barber: &Barber,
    ) -> Result<(), DomainError> {
        let update = ProfileUpdate {
            name: barber.full_name(),
            picture: barber.profile_image_url.clone(),
        };
        self.identity.patch_user_profile(grant, &update).await?;
        info!("Synced barber profile to identity provider");
        Ok(())
    }
}
