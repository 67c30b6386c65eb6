//! Create `user` table.
//!
//! Holds both clients and service providers; providers carry the extra
//! bio/experience and service-location columns. Includes soft-delete
//! timestamp.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_len(User::Email, 255).unique_key().not_null())
                    .col(string_len(User::Name, 128).not_null())
                    .col(ColumnDef::new(User::Phone).string_len(32).null())
                    .col(ColumnDef::new(User::Document).string_len(14).null())
                    .col(boolean(User::IsProvider).not_null())
                    .col(boolean(User::ProviderEnabled).not_null())
                    .col(boolean(User::IsAdmin).not_null())
                    .col(boolean(User::EmailVerified).not_null())
                    .col(ColumnDef::new(User::VerificationToken).string_len(64).null())
                    .col(ColumnDef::new(User::City).string_len(128).null())
                    .col(ColumnDef::new(User::State).string_len(64).null())
                    .col(ColumnDef::new(User::Location).string_len(255).null())
                    .col(ColumnDef::new(User::Bio).text().null())
                    .col(ColumnDef::new(User::ExperienceYears).integer().null())
                    .col(string_len(User::Status, 32).not_null())
                    .col(timestamp_with_time_zone(User::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(User::UpdatedAt).not_null())
                    // Explicitly define nullable deleted_at to avoid conflicting NULL/NOT NULL
                    .col(
                        ColumnDef::new(User::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Email,
    Name,
    Phone,
    Document,
    IsProvider,
    ProviderEnabled,
    IsAdmin,
    EmailVerified,
    VerificationToken,
    City,
    State,
    Location,
    Bio,
    ExperienceYears,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
