use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // UserCredentials: one credentials row per user
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_credentials_user")
                    .table(UserCredentials::Table)
                    .col(UserCredentials::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // User: document lookups (admin vetting)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_document")
                    .table(User::Table)
                    .col(User::Document)
                    .to_owned(),
            )
            .await?;

        // User: provider listings filter on both flags
        manager
            .create_index(
                Index::create()
                    .name("idx_user_provider_enabled")
                    .table(User::Table)
                    .col(User::IsProvider)
                    .col(User::ProviderEnabled)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uniq_user_credentials_user")
                    .table(UserCredentials::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_document").table(User::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_provider_enabled")
                    .table(User::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum User { Table, Document, IsProvider, ProviderEnabled }

#[derive(DeriveIden)]
enum UserCredentials { Table, UserId }
