#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bookings::contract::caller::ProfileSyncGrant;
use bookings::contract::client::BookingsApi;
use bookings::contract::model::{Appointment, Barber, NewAppointment, NewBarber, PersonName, ServiceName};
use bookings::domain::error::DomainError;
use bookings::domain::ports::{IdentityProvider, ProfileUpdate};
use bookings::{Bookings, BookingsConfig};
use sea_orm::Database;

/// Identity provider double that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingIdentity {
    pub calls: Mutex<Vec<(ProfileSyncGrant, ProfileUpdate)>>,
    pub fail_with_status: Mutex<Option<u16>>,
}

impl RecordingIdentity {
    pub fn calls(&self) -> Vec<(ProfileSyncGrant, ProfileUpdate)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_next(&self, status: u16) {
        *self.fail_with_status.lock().unwrap() = Some(status);
    }
}

#[async_trait]
impl IdentityProvider for RecordingIdentity {
    async fn patch_user_profile(
        &self,
        grant: &ProfileSyncGrant,
        update: &ProfileUpdate,
    ) -> Result<(), DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((grant.clone(), update.clone()));
        match self.fail_with_status.lock().unwrap().take() {
            Some(status) => Err(DomainError::identity_sync(format!("HTTP {status}"))),
            None => Ok(()),
        }
    }
}

pub struct TestEnv {
    pub api: Arc<dyn BookingsApi>,
    pub identity: Arc<RecordingIdentity>,
    pub module: Bookings,
}

/// Fresh in-memory database with migrations applied.
pub async fn setup() -> TestEnv {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    let identity = Arc::new(RecordingIdentity::default());
    let module = Bookings::default();
    module
        .init_with_identity(db, BookingsConfig::default(), identity.clone())
        .await
        .expect("Failed to init bookings module");
    let api = module.client().expect("client available after init");
    TestEnv {
        api,
        identity,
        module,
    }
}

pub async fn barber(api: &Arc<dyn BookingsApi>, email: &str, first: &str, last: &str) -> Barber {
    api.create_barber(NewBarber {
        email: email.to_string(),
        name: Some(PersonName::new(first, last)),
    })
    .await
    .expect("create barber")
}

pub fn new_appointment(barber_id: &str, time: &str) -> NewAppointment {
    NewAppointment {
        barber_id: barber_id.to_string(),
        name: PersonName::new("Jane", "Customer"),
        email: "jane@customer.test".to_string(),
        phone_number: "+1-555-0100".to_string(),
        duration: 30,
        service_name: ServiceName::Haircut,
        time: time.to_string(),
    }
}

pub async fn appointment(api: &Arc<dyn BookingsApi>, barber: &Barber, time: &str) -> Appointment {
    api.create_appointment(new_appointment(&barber.id.to_string(), time))
        .await
        .expect("create appointment")
}
