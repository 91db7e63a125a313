use sea_orm_migration::prelude::*;

use super::envelope::{date, float, live_index, record_table, text};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(record_table(
                BiosecurityCommodities::Table,
                vec![
                    text(BiosecurityCommodities::Name),
                    text(BiosecurityCommodities::Category),
                    text(BiosecurityCommodities::HsCode),
                    text(BiosecurityCommodities::ScientificName),
                    text(BiosecurityCommodities::RiskLevel),
                    text(BiosecurityCommodities::Description),
                ],
            ))
            .await?;
        manager
            .create_index(live_index(
                BiosecurityCommodities::Table,
                "idx_biosecurity_commodities_deleted_at",
            ))
            .await?;

        manager
            .create_table(record_table(
                CommodityPrices::Table,
                vec![
                    text(CommodityPrices::CommodityUuid),
                    text(CommodityPrices::Market),
                    text(CommodityPrices::Unit),
                    float(CommodityPrices::Price),
                    date(CommodityPrices::RecordedDate),
                ],
            ))
            .await?;
        manager
            .create_index(live_index(
                CommodityPrices::Table,
                "idx_commodity_prices_deleted_at",
            ))
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_commodity_prices_commodity_uuid")
                    .table(CommodityPrices::Table)
                    .col(CommodityPrices::CommodityUuid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommodityPrices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BiosecurityCommodities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BiosecurityCommodities {
    Table,
    Name,
    Category,
    HsCode,
    ScientificName,
    RiskLevel,
    Description,
}

#[derive(DeriveIden)]
enum CommodityPrices {
    Table,
    CommodityUuid,
    Market,
    Unit,
    Price,
    RecordedDate,
}
