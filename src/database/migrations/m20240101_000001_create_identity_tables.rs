use sea_orm_migration::prelude::*;

use super::envelope::{live_index, record_table, text};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(record_table(
                UserRoles::Table,
                vec![
                    text(UserRoles::Name),
                    ColumnDef::new(UserRoles::Privileges)
                        .json()
                        .not_null()
                        .to_owned(),
                ],
            ))
            .await?;
        manager
            .create_index(live_index(UserRoles::Table, "idx_user_roles_deleted_at"))
            .await?;

        manager
            .create_table(record_table(
                Users::Table,
                vec![
                    text(Users::Username),
                    text(Users::Email),
                    text(Users::PasswordHash),
                    text(Users::RoleUuid),
                    ColumnDef::new(Users::Status)
                        .string()
                        .not_null()
                        .default("Active")
                        .to_owned(),
                    ColumnDef::new(Users::LastLoginAt)
                        .timestamp_with_time_zone()
                        .null()
                        .to_owned(),
                ],
            ))
            .await?;
        manager
            .create_index(live_index(Users::Table, "idx_users_deleted_at"))
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserSessions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserSessions::Uuid)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UserSessions::UserUuid).string().not_null())
                    .col(ColumnDef::new(UserSessions::Status).string().not_null())
                    .col(
                        ColumnDef::new(UserSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserSessions::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserSessions::LoggedOutAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_sessions_user_uuid")
                    .table(UserSessions::Table)
                    .col(UserSessions::UserUuid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserRoles {
    Table,
    Name,
    Privileges,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Username,
    Email,
    PasswordHash,
    RoleUuid,
    Status,
    LastLoginAt,
}

#[derive(DeriveIden)]
enum UserSessions {
    Table,
    Id,
    Uuid,
    UserUuid,
    Status,
    CreatedAt,
    ExpiresAt,
    LoggedOutAt,
}
