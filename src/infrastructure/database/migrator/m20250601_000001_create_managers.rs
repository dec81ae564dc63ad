//! Migration to create managers table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Managers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Managers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Managers::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Managers::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Managers::PhoneNumber).string_len(10).null())
                    .col(ColumnDef::new(Managers::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Managers::GoogleId).string().null())
                    .col(
                        ColumnDef::new(Managers::IsGoogleAccount)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Managers::IsAuthorized)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Managers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Managers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_managers_email")
                    .table(Managers::Table)
                    .col(Managers::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Managers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Managers {
    Table,
    Id,
    Name,
    Email,
    PhoneNumber,
    PasswordHash,
    GoogleId,
    IsGoogleAccount,
    IsAuthorized,
    CreatedAt,
    UpdatedAt,
}
