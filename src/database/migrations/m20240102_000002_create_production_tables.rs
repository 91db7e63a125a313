use sea_orm_migration::prelude::*;

use super::envelope::{date, float, integer, live_index, record_table, text};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(record_table(
                CropProductions::Table,
                vec![
                    text(CropProductions::FarmerUuid),
                    text(CropProductions::CropName),
                    text(CropProductions::CropCategory),
                    float(CropProductions::PlantedArea),
                    float(CropProductions::QuantityKg),
                    float(CropProductions::ProductionValue),
                    date(CropProductions::ProductionDate),
                    text(CropProductions::Remarks),
                ],
            ))
            .await?;
        manager
            .create_index(live_index(
                CropProductions::Table,
                "idx_crop_productions_deleted_at",
            ))
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_crop_productions_farmer_uuid")
                    .table(CropProductions::Table)
                    .col(CropProductions::FarmerUuid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(record_table(
                LivestockProductions::Table,
                vec![
                    text(LivestockProductions::FarmerUuid),
                    text(LivestockProductions::LivestockType),
                    integer(LivestockProductions::HeadCount),
                    float(LivestockProductions::QuantityKg),
                    float(LivestockProductions::ProductionValue),
                    date(LivestockProductions::ProductionDate),
                    text(LivestockProductions::Remarks),
                ],
            ))
            .await?;
        manager
            .create_index(live_index(
                LivestockProductions::Table,
                "idx_livestock_productions_deleted_at",
            ))
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_livestock_productions_farmer_uuid")
                    .table(LivestockProductions::Table)
                    .col(LivestockProductions::FarmerUuid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LivestockProductions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CropProductions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CropProductions {
    Table,
    FarmerUuid,
    CropName,
    CropCategory,
    PlantedArea,
    QuantityKg,
    ProductionValue,
    ProductionDate,
    Remarks,
}

#[derive(DeriveIden)]
enum LivestockProductions {
    Table,
    FarmerUuid,
    LivestockType,
    HeadCount,
    QuantityKg,
    ProductionValue,
    ProductionDate,
    Remarks,
}
