use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::DatabaseTransaction;
use serde::{Deserialize, Serialize};

use crate::errors::CoreResult;
use crate::records::{ensure_live_reference, CoercedPayload, FieldSpec, ManagedEntity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "crop_productions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: String,
    #[serde(rename = "farmerUUID")]
    pub farmer_uuid: String,
    pub crop_name: String,
    pub crop_category: String,
    pub planted_area: f64,
    pub quantity_kg: f64,
    pub production_value: f64,
    pub production_date: Option<ChronoDate>,
    pub remarks: String,
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
    FieldSpec::uuid("farmerUUID", "farmer_uuid", "farmer").required(),
    FieldSpec::text("cropName", "crop_name", "crop name").required(),
    FieldSpec::text("cropCategory", "crop_category", "crop category"),
    FieldSpec::float("plantedArea", "planted_area", "planted area"),
    FieldSpec::float("quantityKg", "quantity_kg", "quantity (kg)"),
    FieldSpec::float("productionValue", "production_value", "production value"),
    FieldSpec::date("productionDate", "production_date", "production date"),
    FieldSpec::text("remarks", "remarks", "remarks"),
];

#[async_trait]
impl ManagedEntity for Entity {
    const RESOURCE: &'static str = "CropProduction";
    const DISPLAY: &'static str = "Crop production";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn search_columns() -> &'static [&'static str] {
        &["crop_name", "crop_category"]
    }

    async fn validate(
        txn: &DatabaseTransaction,
        payload: &CoercedPayload,
        _current: Option<&str>,
    ) -> CoreResult<()> {
        if let Some(farmer) = payload.text("farmerUUID") {
            ensure_live_reference::<super::farmer_profiles::Entity, _>(txn, farmer, "farmerUUID")
                .await?;
        }
        Ok(())
    }
}
