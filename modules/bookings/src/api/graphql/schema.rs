use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Result, Schema, ID};

use crate::api::graphql::error::gql;
use crate::api::graphql::inputs::{
    CreateAppointmentInput, CreateBarberInput, UpdateAppointmentInput, UpdateBarberInput,
};
use crate::api::graphql::objects::{api, caller, AppointmentObject, BarberObject};
use crate::contract::client::BookingsApi;
use crate::domain::policy;

pub type BookingsSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema over an in-process client. The caller context is attached per request.
pub fn build_schema(api: Arc<dyn BookingsApi>) -> BookingsSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(api)
        .finish()
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn appointments(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "barberID")] barber_id: Option<ID>,
        date: Option<String>,
    ) -> Result<Vec<AppointmentObject>> {
        let items = api(ctx)?
            .list_appointments(barber_id.as_ref().map(|id| id.as_str()), date.as_deref())
            .await
            .map_err(gql)?;
        Ok(items.into_iter().map(AppointmentObject).collect())
    }

    async fn appointment(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "appointmentID")] appointment_id: ID,
    ) -> Result<Option<AppointmentObject>> {
        let found = api(ctx)?
            .get_appointment(&appointment_id)
            .await
            .map_err(gql)?;
        Ok(found.map(AppointmentObject))
    }

    async fn barbers(
        &self,
        ctx: &Context<'_>,
        date_time: Option<String>,
    ) -> Result<Vec<BarberObject>> {
        let items = api(ctx)?
            .list_barbers(date_time.as_deref())
            .await
            .map_err(gql)?;
        Ok(items.into_iter().map(BarberObject).collect())
    }

    async fn barber(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "barberID")] barber_id: Option<ID>,
        email: Option<String>,
    ) -> Result<BarberObject> {
        api(ctx)?
            .get_barber(barber_id.as_ref().map(|id| id.as_str()), email.as_deref())
            .await
            .map(BarberObject)
            .map_err(gql)
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_appointment(
        &self,
        ctx: &Context<'_>,
        input: CreateAppointmentInput,
    ) -> Result<AppointmentObject> {
        api(ctx)?
            .create_appointment(input.into())
            .await
            .map(AppointmentObject)
            .map_err(gql)
    }

    async fn create_barber(
        &self,
        ctx: &Context<'_>,
        input: CreateBarberInput,
    ) -> Result<BarberObject> {
        api(ctx)?
            .create_barber(input.into())
            .await
            .map(BarberObject)
            .map_err(gql)
    }

    async fn update_appointment(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "appointmentID")] appointment_id: ID,
        input: UpdateAppointmentInput,
    ) -> Result<AppointmentObject> {
        api(ctx)?
            .update_appointment(&appointment_id, input.into())
            .await
            .map(AppointmentObject)
            .map_err(gql)
    }

    /// Admin-only. The updated profile is mirrored to the identity provider afterwards.
    async fn update_barber(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "barberID")] barber_id: ID,
        input: UpdateBarberInput,
    ) -> Result<BarberObject> {
        let grant = policy::authorize_barber_update(caller(ctx)).map_err(gql)?;
        let api = api(ctx)?;
        let barber = api
            .update_barber(&barber_id, input.into())
            .await
            .map_err(gql)?;
        api.sync_identity_profile(&grant, &barber)
            .await
            .map_err(gql)?;
        Ok(BarberObject(barber))
    }
}
