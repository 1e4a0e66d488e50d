use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// First/last name pair shared by appointments and barbers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// Joins the parts with a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }

    /// Inverse of [`PersonName::full_name`]: splits at the first space.
    ///
    /// Without a space the whole value becomes `last` and `first` is empty.
    pub fn from_full_name(full: &str) -> Self {
        match full.split_once(' ') {
            Some((first, last)) => Self::new(first, last),
            None => Self::new("", full),
        }
    }
}

/// Services a barber can be booked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    Haircut,
    Shaving,
    Combo,
    Fatherson,
    Junior,
}

impl ServiceName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceName::Haircut => "HAIRCUT",
            ServiceName::Shaving => "SHAVING",
            ServiceName::Combo => "COMBO",
            ServiceName::Fatherson => "FATHERSON",
            ServiceName::Junior => "JUNIOR",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service name: {0}")]
pub struct UnknownServiceName(pub String);

impl FromStr for ServiceName {
    type Err = UnknownServiceName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HAIRCUT" => Ok(ServiceName::Haircut),
            "SHAVING" => Ok(ServiceName::Shaving),
            "COMBO" => Ok(ServiceName::Combo),
            "FATHERSON" => Ok(ServiceName::Fatherson),
            "JUNIOR" => Ok(ServiceName::Junior),
            other => Err(UnknownServiceName(other.to_string())),
        }
    }
}

/// A booking held by exactly one barber.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub duration: i32,
    pub email: String,
    pub name: PersonName,
    pub phone_number: String,
    pub service_name: ServiceName,
    pub time: DateTime<Utc>,
    pub barber_id: Uuid,
}

impl Appointment {
    pub fn full_name(&self) -> String {
        self.name.full_name()
    }
}

/// Service provider with its append-only appointment reference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barber {
    pub id: Uuid,
    pub name: PersonName,
    pub email: String,
    pub profile_image_url: Option<String>,
    /// Insertion order, not time order. May reference appointments that no longer exist.
    pub appointment_ids: Vec<Uuid>,
}

impl Barber {
    pub fn full_name(&self) -> String {
        self.name.full_name()
    }
}

/// Data for booking an appointment. `time` is an ISO-8601 string.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub barber_id: String,
    pub name: PersonName,
    pub email: String,
    pub phone_number: String,
    pub duration: i32,
    pub service_name: ServiceName,
    pub time: String,
}

/// Partial update for an appointment.
///
/// `full_name`, when present, is split into `name` and wins over `name`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppointmentPatch {
    pub barber_id: Option<String>,
    pub name: Option<PersonName>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub duration: Option<i32>,
    pub service_name: Option<ServiceName>,
    pub time: Option<String>,
}

/// Fields accepted when a barber is registered. Deliberately narrower than [`BarberPatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBarber {
    pub email: String,
    pub name: Option<PersonName>,
}

/// Partial update for a barber. The appointment reference list is not writable here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BarberPatch {
    pub name: Option<PersonName>,
    pub email: Option<String>,
    pub profile_image_url: Option<String>,
}
