use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::DatabaseTransaction;
use serde::{Deserialize, Serialize};

use crate::errors::CoreResult;
use crate::records::{
    ensure_live_reference, ensure_unique_live, CoercedPayload, FieldSpec, ManagedEntity,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "farmer_profiles")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: String,
    pub rocbn_reg_no: String,
    pub farmer_name: String,
    pub ic_no: String,
    #[serde(rename = "companyUUID")]
    pub company_uuid: String,
    pub farm_location: String,
    pub district: String,
    pub mukim: String,
    pub phone: String,
    pub farm_area: f64,
    pub registered_date: Option<ChronoDate>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
    pub deleted_at: String,
    pub created_by: Json,
    pub updated_by: Json,
    pub deleted_by: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("rocbnRegNo", "rocbn_reg_no", "ROCBN Reg. No").required(),
    FieldSpec::text("farmerName", "farmer_name", "farmer name").required(),
    FieldSpec::text("icNo", "ic_no", "IC No"),
    FieldSpec::uuid("companyUUID", "company_uuid", "company"),
    FieldSpec::text("farmLocation", "farm_location", "farm location"),
    FieldSpec::text("district", "district", "district"),
    FieldSpec::text("mukim", "mukim", "mukim"),
    FieldSpec::text("phone", "phone", "phone"),
    FieldSpec::float("farmArea", "farm_area", "farm area"),
    FieldSpec::date("registeredDate", "registered_date", "registered date"),
];

#[async_trait]
impl ManagedEntity for Entity {
    const RESOURCE: &'static str = "FarmerProfile";
    const DISPLAY: &'static str = "Farmer profile";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn search_columns() -> &'static [&'static str] {
        &["rocbn_reg_no", "farmer_name", "ic_no", "district"]
    }

    async fn validate(
        txn: &DatabaseTransaction,
        payload: &CoercedPayload,
        current: Option<&str>,
    ) -> CoreResult<()> {
        if let Some(reg_no) = payload.text("rocbnRegNo") {
            ensure_unique_live::<Entity, _>(txn, "rocbn_reg_no", reg_no, "ROCBN Reg. No", current)
                .await?;
        }
        if let Some(company) = payload.text("companyUUID").filter(|uuid| !uuid.is_empty()) {
            ensure_live_reference::<super::company_profiles::Entity, _>(
                txn,
                company,
                "companyUUID",
            )
            .await?;
        }
        Ok(())
    }
}
