use async_graphql::{Enum, InputObject, SimpleObject, ID};

use crate::contract::model::{
    AppointmentPatch, BarberPatch, NewAppointment, NewBarber, PersonName, ServiceName,
};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "ServiceName")]
pub enum ServiceNameValue {
    Haircut,
    Shaving,
    Combo,
    Fatherson,
    Junior,
}

impl From<ServiceName> for ServiceNameValue {
    fn from(s: ServiceName) -> Self {
        match s {
            ServiceName::Haircut => Self::Haircut,
            ServiceName::Shaving => Self::Shaving,
            ServiceName::Combo => Self::Combo,
            ServiceName::Fatherson => Self::Fatherson,
            ServiceName::Junior => Self::Junior,
        }
    }
}

impl From<ServiceNameValue> for ServiceName {
    fn from(s: ServiceNameValue) -> Self {
        match s {
            ServiceNameValue::Haircut => Self::Haircut,
            ServiceNameValue::Shaving => Self::Shaving,
            ServiceNameValue::Combo => Self::Combo,
            ServiceNameValue::Fatherson => Self::Fatherson,
            ServiceNameValue::Junior => Self::Junior,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "Name")]
pub struct NameObject {
    pub first: String,
    pub last: String,
}

impl From<PersonName> for NameObject {
    fn from(n: PersonName) -> Self {
        Self {
            first: n.first,
            last: n.last,
        }
    }
}

#[derive(InputObject, Clone, Debug)]
pub struct NameInput {
    pub first: String,
    pub last: String,
}

impl From<NameInput> for PersonName {
    fn from(n: NameInput) -> Self {
        PersonName::new(n.first, n.last)
    }
}

#[derive(InputObject, Debug)]
pub struct CreateAppointmentInput {
    #[graphql(name = "barberID")]
    pub barber_id: ID,
    pub name: NameInput,
    pub email: String,
    pub phone_number: String,
    pub duration: i32,
    pub service_name: ServiceNameValue,
    /// ISO-8601 instant.
    pub time: String,
}

impl From<CreateAppointmentInput> for NewAppointment {
    fn from(i: CreateAppointmentInput) -> Self {
        NewAppointment {
            barber_id: i.barber_id.0,
            name: i.name.into(),
            email: i.email,
            phone_number: i.phone_number,
            duration: i.duration,
            service_name: i.service_name.into(),
            time: i.time,
        }
    }
}

#[derive(InputObject, Debug, Default)]
pub struct UpdateAppointmentInput {
    #[graphql(name = "barberID")]
    pub barber_id: Option<ID>,
    pub name: Option<NameInput>,
    /// Split at the first space; overrides `name`.
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub duration: Option<i32>,
    pub service_name: Option<ServiceNameValue>,
    pub time: Option<String>,
}

impl From<UpdateAppointmentInput> for AppointmentPatch {
    fn from(i: UpdateAppointmentInput) -> Self {
        AppointmentPatch {
            barber_id: i.barber_id.map(|id| id.0),
            name: i.name.map(Into::into),
            full_name: i.full_name,
            email: i.email,
            phone_number: i.phone_number,
            duration: i.duration,
            service_name: i.service_name.map(Into::into),
            time: i.time,
        }
    }
}

/// Registration payload sent by the identity provider's sign-up hook.
#[derive(InputObject, Debug)]
pub struct CreateBarberInput {
    pub email: String,
    pub name: Option<NameInput>,
}

impl From<CreateBarberInput> for NewBarber {
    fn from(i: CreateBarberInput) -> Self {
        NewBarber {
            email: i.email,
            name: i.name.map(Into::into),
        }
    }
}

#[derive(InputObject, Debug, Default)]
pub struct UpdateBarberInput {
    pub name: Option<NameInput>,
    pub email: Option<String>,
    #[graphql(name = "profileImageURL")]
    pub profile_image_url: Option<String>,
}

impl From<UpdateBarberInput> for BarberPatch {
    fn from(i: UpdateBarberInput) -> Self {
        BarberPatch {
            name: i.name.map(Into::into),
            email: i.email,
            profile_image_url: i.profile_image_url,
        }
    }
}
