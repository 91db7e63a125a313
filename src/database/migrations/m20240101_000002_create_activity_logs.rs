use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ActivityLogs::Uuid)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ActivityLogs::ActorUuid).string().not_null())
                    .col(
                        ColumnDef::new(ActivityLogs::ActorUsername)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActivityLogs::Action).string().not_null())
                    .col(ColumnDef::new(ActivityLogs::TableName).string().not_null())
                    .col(ColumnDef::new(ActivityLogs::RecordUuid).string().not_null())
                    .col(ColumnDef::new(ActivityLogs::DataSnapshot).json().not_null())
                    .col(
                        ColumnDef::new(ActivityLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_logs_table_record")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::TableName)
                    .col(ActivityLogs::RecordUuid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActivityLogs {
    Table,
    Id,
    Uuid,
    ActorUuid,
    ActorUsername,
    Action,
    TableName,
    RecordUuid,
    DataSnapshot,
    CreatedAt,
}
