use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::DatabaseTransaction;
use serde::{Deserialize, Serialize};

use crate::errors::CoreResult;
use crate::records::{ensure_live_reference, CoercedPayload, FieldSpec, ManagedEntity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "livestock_productions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: String,
    #[serde(rename = "farmerUUID")]
    pub farmer_uuid: String,
    pub livestock_type: String,
    pub head_count: i64,
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
    FieldSpec::text("livestockType", "livestock_type", "livestock type").required(),
    FieldSpec::integer("headCount", "head_count", "head count"),
    FieldSpec::float("quantityKg", "quantity_kg", "quantity (kg)"),
    FieldSpec::float("productionValue", "production_value", "production value"),
    FieldSpec::date("productionDate", "production_date", "production date"),
    FieldSpec::text("remarks", "remarks", "remarks"),
];

#[async_trait]
impl ManagedEntity for Entity {
    const RESOURCE: &'static str = "LivestockProduction";
    const DISPLAY: &'static str = "Livestock production";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn search_columns() -> &'static [&'static str] {
        &["livestock_type"]
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
