use std::sync::Arc;

use async_graphql::{Context, Object, Result, ID};
use chrono::SecondsFormat;
use futures::future::try_join_all;

use crate::api::graphql::error::{gql, gql_domain};
use crate::api::graphql::inputs::{NameObject, ServiceNameValue};
use crate::contract::caller::CallerContext;
use crate::contract::client::BookingsApi;
use crate::contract::error::BookingsError;
use crate::contract::model::{Appointment, Barber};
use crate::domain::policy;
use crate::domain::time::utc_day_bounds;

static ANONYMOUS: CallerContext = CallerContext {
    identity: None,
    management_token: None,
    provider_domain: None,
};

/// Caller context of the current request; anonymous when the transport set none.
pub(crate) fn caller<'a>(ctx: &'a Context<'_>) -> &'a CallerContext {
    ctx.data_opt::<CallerContext>().unwrap_or(&ANONYMOUS)
}

pub(crate) fn api<'a>(ctx: &'a Context<'_>) -> Result<&'a Arc<dyn BookingsApi>> {
    ctx.data::<Arc<dyn BookingsApi>>()
}

/// Permission check, then a barber lookup by the caller's email, then email comparison.
async fn ensure_appointment_data(ctx: &Context<'_>) -> Result<()> {
    let caller = caller(ctx);
    let email = policy::can_read_appointment_data(caller).map_err(gql)?;
    let assigned = match api(ctx)?.get_barber(None, Some(email)).await {
        Ok(barber) => Some(barber.email),
        Err(BookingsError::NotFound { .. }) => None,
        Err(e) => return Err(gql(e)),
    };
    policy::authorize_appointment_data(caller, assigned.as_deref()).map_err(gql)
}

pub struct AppointmentObject(pub Appointment);

impl From<Appointment> for AppointmentObject {
    fn from(a: Appointment) -> Self {
        Self(a)
    }
}

#[Object(name = "Appointment")]
impl AppointmentObject {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn duration(&self) -> i32 {
        self.0.duration
    }

    async fn service_name(&self) -> ServiceNameValue {
        self.0.service_name.into()
    }

    /// ISO-8601 with millisecond precision, always UTC.
    async fn time(&self) -> String {
        self.0.time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    #[graphql(name = "barberID")]
    async fn barber_id(&self) -> ID {
        ID(self.0.barber_id.to_string())
    }

    async fn barber(&self, ctx: &Context<'_>) -> Result<BarberObject> {
        let id = self.0.barber_id.to_string();
        api(ctx)?
            .get_barber(Some(&id), None)
            .await
            .map(BarberObject)
            .map_err(gql)
    }

    async fn full_name(&self, ctx: &Context<'_>) -> Result<String> {
        ensure_appointment_data(ctx).await?;
        Ok(self.0.full_name())
    }

    async fn email(&self, ctx: &Context<'_>) -> Result<String> {
        ensure_appointment_data(ctx).await?;
        Ok(self.0.email.clone())
    }

    async fn phone_number(&self, ctx: &Context<'_>) -> Result<String> {
        ensure_appointment_data(ctx).await?;
        Ok(self.0.phone_number.clone())
    }
}

pub struct BarberObject(pub Barber);

impl From<Barber> for BarberObject {
    fn from(b: Barber) -> Self {
        Self(b)
    }
}

/// Keeps appointments strictly inside the UTC day: both midnights are excluded.
pub(crate) fn strictly_within_day(
    appointments: Vec<Appointment>,
    date: &str,
) -> std::result::Result<Vec<Appointment>, crate::domain::error::DomainError> {
    let (start, end) = utc_day_bounds(date)?;
    Ok(appointments
        .into_iter()
        .filter(|a| a.time > start && a.time < end)
        .collect())
}

#[Object(name = "Barber")]
impl BarberObject {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> NameObject {
        self.0.name.clone().into()
    }

    async fn email(&self, ctx: &Context<'_>) -> Result<String> {
        policy::authorize_barber_email(caller(ctx), &self.0.email).map_err(gql)?;
        Ok(self.0.email.clone())
    }

    #[graphql(name = "profileImageURL")]
    async fn profile_image_url(&self) -> Option<String> {
        self.0.profile_image_url.clone()
    }

    #[graphql(name = "appointmentIDS")]
    async fn appointment_ids(&self) -> Vec<ID> {
        self.0
            .appointment_ids
            .iter()
            .map(|id| ID(id.to_string()))
            .collect()
    }

    /// Referenced appointments sorted by time, optionally only those strictly inside one UTC day.
    async fn appointments(
        &self,
        ctx: &Context<'_>,
        date: Option<String>,
    ) -> Result<Vec<AppointmentObject>> {
        let api = api(ctx)?;
        let ids: Vec<String> = self
            .0
            .appointment_ids
            .iter()
            .map(|id| id.to_string())
            .collect();
        let found = try_join_all(ids.iter().map(|id| api.get_appointment(id)))
            .await
            .map_err(gql)?;
        let mut appointments: Vec<Appointment> = found.into_iter().flatten().collect();

        if let Some(date) = date.as_deref().filter(|d| !d.is_empty()) {
            appointments = strictly_within_day(appointments, date).map_err(gql_domain)?;
        }
        appointments.sort_by_key(|a| a.time);
        Ok(appointments.into_iter().map(AppointmentObject).collect())
    }
}
