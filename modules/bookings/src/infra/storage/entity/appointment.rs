use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub duration: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    /// Wire name of the service, e.g. `HAIRCUT`.
    pub service_name: String,
    pub time: DateTime<Utc>,
    pub barber_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
