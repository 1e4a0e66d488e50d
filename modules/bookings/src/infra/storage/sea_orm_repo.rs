//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it can run on a `DatabaseConnection`
//! or inside a transaction.

use std::collections::{HashMap, HashSet};

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::contract::model::{Appointment, Barber};
use crate::domain::repo::{AppointmentFilter, BookingsRepository, PopulatedBarber};
use crate::infra::storage::entity::{appointment, barber};
use crate::infra::storage::mapper::{
    appointment_from_model, appointment_to_active, barber_from_model, decode_appointment_ids,
    encode_appointment_ids,
};

const POPULATE_CHUNK: usize = 500;

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmBookingsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmBookingsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn appointments_from(rows: Vec<appointment::Model>) -> anyhow::Result<Vec<Appointment>> {
    rows.into_iter().map(appointment_from_model).collect()
}

#[async_trait::async_trait]
impl<C> BookingsRepository for SeaOrmBookingsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> anyhow::Result<Vec<Appointment>> {
        let mut cond = Condition::all();
        if let Some(barber_id) = filter.barber_id {
            cond = cond.add(appointment::Column::BarberId.eq(barber_id));
        }
        if let Some(from) = filter.time_from {
            cond = cond.add(appointment::Column::Time.gte(from));
        }
        if let Some(before) = filter.time_before {
            cond = cond.add(appointment::Column::Time.lt(before));
        }

        let rows = appointment::Entity::find()
            .filter(cond)
            .order_by_asc(appointment::Column::Time)
            .all(&self.conn)
            .await
            .context("find_appointments failed")?;
        appointments_from(rows)
    }

    async fn find_appointment(&self, id: Uuid) -> anyhow::Result<Option<Appointment>> {
        let found = appointment::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_appointment failed")?;
        found.map(appointment_from_model).transpose()
    }

    async fn insert_appointment(&self, a: Appointment) -> anyhow::Result<()> {
        let _ = appointment_to_active(a)
            .insert(&self.conn)
            .await
            .context("insert_appointment failed")?;
        Ok(())
    }

    async fn update_appointment(&self, a: Appointment) -> anyhow::Result<()> {
        let _ = appointment_to_active(a)
            .update(&self.conn)
            .await
            .context("update_appointment failed")?;
        Ok(())
    }

    async fn list_barbers(&self) -> anyhow::Result<Vec<Barber>> {
        let rows = barber::Entity::find()
            .all(&self.conn)
            .await
            .context("list_barbers failed")?;
        rows.into_iter().map(barber_from_model).collect()
    }

    async fn find_barber(&self, id: Uuid) -> anyhow::Result<Option<Barber>> {
        let found = barber::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_barber failed")?;
        found.map(barber_from_model).transpose()
    }

    async fn find_barber_by_email(&self, email: &str) -> anyhow::Result<Option<Barber>> {
        let found = barber::Entity::find()
            .filter(barber::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("find_barber_by_email failed")?;
        found.map(barber_from_model).transpose()
    }

    async fn insert_barber(&self, b: Barber) -> anyhow::Result<()> {
        let m = barber::ActiveModel {
            id: Set(b.id),
            first_name: Set(b.name.first),
            last_name: Set(b.name.last),
            email: Set(b.email),
            profile_image_url: Set(b.profile_image_url),
            appointment_ids: Set(encode_appointment_ids(&b.appointment_ids)),
        };
        let _ = m.insert(&self.conn).await.context("insert_barber failed")?;
        Ok(())
    }

    async fn update_barber(&self, b: Barber) -> anyhow::Result<()> {
        // appointment_ids stays NotSet so concurrent appends are not clobbered
        let m = barber::ActiveModel {
            id: Set(b.id),
            first_name: Set(b.name.first),
            last_name: Set(b.name.last),
            email: Set(b.email),
            profile_image_url: Set(b.profile_image_url),
            ..Default::default()
        };
        let _ = m.update(&self.conn).await.context("update_barber failed")?;
        Ok(())
    }

    async fn push_appointment_ref(
        &self,
        barber_id: Uuid,
        appointment_id: Uuid,
    ) -> anyhow::Result<bool> {
        let Some(row) = barber::Entity::find_by_id(barber_id)
            .one(&self.conn)
            .await
            .context("push_appointment_ref lookup failed")?
        else {
            return Ok(false);
        };

        let mut ids = decode_appointment_ids(&row.appointment_ids)?;
        ids.push(appointment_id);
        let m = barber::ActiveModel {
            id: Set(barber_id),
            appointment_ids: Set(encode_appointment_ids(&ids)),
            ..Default::default()
        };
        let _ = m
            .update(&self.conn)
            .await
            .context("push_appointment_ref failed")?;
        Ok(true)
    }

    async fn populate(&self, barbers: Vec<Barber>) -> anyhow::Result<Vec<PopulatedBarber>> {
        let mut seen = HashSet::new();
        let wanted: Vec<Uuid> = barbers
            .iter()
            .flat_map(|b| b.appointment_ids.iter().copied())
            .filter(|id| seen.insert(*id))
            .collect();

        // Reference lists only grow; keep each IN list under the bind-variable limit.
        let mut by_id: HashMap<Uuid, Appointment> = HashMap::with_capacity(wanted.len());
        for chunk in wanted.chunks(POPULATE_CHUNK) {
            let rows = appointment::Entity::find()
                .filter(appointment::Column::Id.is_in(chunk.iter().copied()))
                .all(&self.conn)
                .await
                .context("populate failed")?;
            for a in appointments_from(rows)? {
                by_id.insert(a.id, a);
            }
        }

        Ok(barbers
            .into_iter()
            .map(|barber| {
                let appointments = barber
                    .appointment_ids
                    .iter()
                    .filter_map(|id| by_id.get(id).cloned())
                    .collect();
                PopulatedBarber {
                    barber,
                    appointments,
                }
            })
            .collect())
    }
}
