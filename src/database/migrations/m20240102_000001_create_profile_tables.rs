use sea_orm_migration::prelude::*;

use super::envelope::{date, float, live_index, record_table, text};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(record_table(
                CompanyProfiles::Table,
                vec![
                    text(CompanyProfiles::CompanyName),
                    text(CompanyProfiles::RegistrationNo),
                    text(CompanyProfiles::Address),
                    text(CompanyProfiles::District),
                    text(CompanyProfiles::ContactPerson),
                    text(CompanyProfiles::Phone),
                    text(CompanyProfiles::Email),
                ],
            ))
            .await?;
        manager
            .create_index(live_index(
                CompanyProfiles::Table,
                "idx_company_profiles_deleted_at",
            ))
            .await?;

        manager
            .create_table(record_table(
                FarmerProfiles::Table,
                vec![
                    text(FarmerProfiles::RocbnRegNo),
                    text(FarmerProfiles::FarmerName),
                    text(FarmerProfiles::IcNo),
                    text(FarmerProfiles::CompanyUuid),
                    text(FarmerProfiles::FarmLocation),
                    text(FarmerProfiles::District),
                    text(FarmerProfiles::Mukim),
                    text(FarmerProfiles::Phone),
                    float(FarmerProfiles::FarmArea),
                    date(FarmerProfiles::RegisteredDate),
                ],
            ))
            .await?;
        manager
            .create_index(live_index(
                FarmerProfiles::Table,
                "idx_farmer_profiles_deleted_at",
            ))
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_farmer_profiles_rocbn_reg_no")
                    .table(FarmerProfiles::Table)
                    .col(FarmerProfiles::RocbnRegNo)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FarmerProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CompanyProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CompanyProfiles {
    Table,
    CompanyName,
    RegistrationNo,
    Address,
    District,
    ContactPerson,
    Phone,
    Email,
}

#[derive(DeriveIden)]
enum FarmerProfiles {
    Table,
    RocbnRegNo,
    FarmerName,
    IcNo,
    CompanyUuid,
    FarmLocation,
    District,
    Mukim,
    Phone,
    FarmArea,
    RegisteredDate,
}
