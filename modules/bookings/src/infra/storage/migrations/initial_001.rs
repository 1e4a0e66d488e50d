use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Barbers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Barbers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Barbers::FirstName).string().not_null())
                    .col(ColumnDef::new(Barbers::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Barbers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Barbers::ProfileImageUrl).string().null())
                    .col(ColumnDef::new(Barbers::AppointmentIds).json().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointments::Duration).integer().not_null())
                    .col(ColumnDef::new(Appointments::Email).string().not_null())
                    .col(ColumnDef::new(Appointments::FirstName).string().not_null())
                    .col(ColumnDef::new(Appointments::LastName).string().not_null())
                    .col(ColumnDef::new(Appointments::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Appointments::ServiceName).string().not_null())
                    .col(
                        ColumnDef::new(Appointments::Time)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Appointments::BarberId).uuid().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appointments_time")
                    .table(Appointments::Table)
                    .col(Appointments::Time)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appointments_barber_id")
                    .table(Appointments::Table)
                    .col(Appointments::BarberId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Barbers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Barbers {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    ProfileImageUrl,
    AppointmentIds,
}

#[derive(DeriveIden)]
enum Appointments {
    Table,
    Id,
    Duration,
    Email,
    FirstName,
    LastName,
    PhoneNumber,
    ServiceName,
    Time,
    BarberId,
}
