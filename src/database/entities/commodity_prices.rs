use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::DatabaseTransaction;
use serde::{Deserialize, Serialize};

use crate::errors::CoreResult;
use crate::records::{
    ensure_live_reference, CoercedPayload, FieldDefault, FieldSpec, ManagedEntity,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "commodity_prices")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: String,
    #[serde(rename = "commodityUUID")]
    pub commodity_uuid: String,
    pub market: String,
    pub unit: String,
    pub price: f64,
    pub recorded_date: Option<ChronoDate>,
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
    FieldSpec::uuid("commodityUUID", "commodity_uuid", "commodity").required(),
    FieldSpec::text("market", "market", "market"),
    FieldSpec::text("unit", "unit", "unit").with_default(FieldDefault::Text("kg")),
    FieldSpec::float("price", "price", "price"),
    FieldSpec::date("recordedDate", "recorded_date", "recorded date"),
];

#[async_trait]
impl ManagedEntity for Entity {
    const RESOURCE: &'static str = "CommodityPrice";
    const DISPLAY: &'static str = "Commodity price";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn search_columns() -> &'static [&'static str] {
        &["market", "unit"]
    }

    async fn validate(
        txn: &DatabaseTransaction,
        payload: &CoercedPayload,
        _current: Option<&str>,
    ) -> CoreResult<()> {
        if let Some(commodity) = payload.text("commodityUUID") {
            ensure_live_reference::<super::biosecurity_commodities::Entity, _>(
                txn,
                commodity,
                "commodityUUID",
            )
            .await?;
        }
        Ok(())
    }
}
