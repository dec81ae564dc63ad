//! Migration to create the session ledger table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sessions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sessions::PrincipalId).string().not_null())
                    .col(ColumnDef::new(Sessions::Role).string_len(20).not_null())
                    .col(ColumnDef::new(Sessions::Method).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Sessions::LoginTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sessions::LogoutTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups are "most recent session for this principal"
        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_principal_login_time")
                    .table(Sessions::Table)
                    .col(Sessions::PrincipalId)
                    .col(Sessions::LoginTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sessions {
    Table,
    Id,
    PrincipalId,
    Role,
    Method,
    LoginTime,
    LogoutTime,
}
