//! Migration to create farmers table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Farmers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Farmers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Farmers::FullName).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Farmers::PhoneNumber)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Farmers::AadharNumber)
                            .string_len(12)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Farmers::CultivationPractices).string().null())
                    .col(ColumnDef::new(Farmers::LandArea).double().not_null())
                    .col(ColumnDef::new(Farmers::LandUnit).string_len(10).null())
                    .col(
                        ColumnDef::new(Farmers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Farmers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_farmers_phone_number")
                    .table(Farmers::Table)
                    .col(Farmers::PhoneNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Farmers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Farmers {
    Table,
    Id,
    FullName,
    PhoneNumber,
    AadharNumber,
    CultivationPractices,
    LandArea,
    LandUnit,
    CreatedAt,
    UpdatedAt,
}
