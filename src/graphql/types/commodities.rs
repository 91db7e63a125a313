use async_graphql::*;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::ActorRef;
use crate::database::entities::{biosecurity_commodities, commodity_prices};
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;

#[derive(SimpleObject, Clone, Debug)]
pub struct BiosecurityCommodity {
    pub id: String,
    pub uuid: String,
    pub name: String,
    pub category: String,
    #[graphql(name = "hsCode")]
    pub hs_code: String,
    #[graphql(name = "scientificName")]
    pub scientific_name: String,
    #[graphql(name = "riskLevel")]
    pub risk_level: String,
    pub description: String,
    #[graphql(name = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[graphql(name = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[graphql(name = "deletedAt")]
    pub deleted_at: String,
    #[graphql(name = "createdBy")]
    pub created_by: ActorRef,
    #[graphql(name = "updatedBy")]
    pub updated_by: ActorRef,
    #[graphql(name = "deletedBy")]
    pub deleted_by: Option<ActorRef>,
}

impl From<biosecurity_commodities::Model> for BiosecurityCommodity {
    fn from(model: biosecurity_commodities::Model) -> Self {
        Self {
            id: model.id.to_string(),
            uuid: model.uuid,
            name: model.name,
            category: model.category,
            hs_code: model.hs_code,
            scientific_name: model.scientific_name,
            risk_level: model.risk_level,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
            created_by: ActorRef::from_json(&model.created_by),
            updated_by: ActorRef::from_json(&model.updated_by),
            deleted_by: ActorRef::from_optional(model.deleted_by.as_ref()),
        }
    }
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BiosecurityCommodityInput {
    pub name: Option<String>,
    pub category: Option<String>,
    #[graphql(name = "hsCode")]
    pub hs_code: Option<String>,
    #[graphql(name = "scientificName")]
    pub scientific_name: Option<String>,
    #[graphql(name = "riskLevel")]
    pub risk_level: Option<String>,
    pub description: Option<String>,
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct CommodityPrice {
    pub id: String,
    pub uuid: String,
    #[graphql(name = "commodityUUID")]
    pub commodity_uuid: String,
    pub market: String,
    pub unit: String,
    pub price: f64,
    #[graphql(name = "recordedDate")]
    pub recorded_date: Option<NaiveDate>,
    #[graphql(name = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[graphql(name = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[graphql(name = "deletedAt")]
    pub deleted_at: String,
    #[graphql(name = "createdBy")]
    pub created_by: ActorRef,
    #[graphql(name = "updatedBy")]
    pub updated_by: ActorRef,
    #[graphql(name = "deletedBy")]
    pub deleted_by: Option<ActorRef>,
}

impl From<commodity_prices::Model> for CommodityPrice {
    fn from(model: commodity_prices::Model) -> Self {
        Self {
            id: model.id.to_string(),
            uuid: model.uuid,
            commodity_uuid: model.commodity_uuid,
            market: model.market,
            unit: model.unit,
            price: model.price,
            recorded_date: model.recorded_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
            created_by: ActorRef::from_json(&model.created_by),
            updated_by: ActorRef::from_json(&model.updated_by),
            deleted_by: ActorRef::from_optional(model.deleted_by.as_ref()),
        }
    }
}

#[ComplexObject]
impl CommodityPrice {
    async fn commodity(&self, ctx: &Context<'_>) -> Result<Option<BiosecurityCommodity>> {
        let context = ctx.data::<GraphQLContext>()?;
        let commodity = context
            .app
            .get_record::<biosecurity_commodities::Entity>(
                &context.session(ctx),
                &self.commodity_uuid,
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(commodity.map(BiosecurityCommodity::from))
    }
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommodityPriceInput {
    #[graphql(name = "commodityUUID")]
    #[serde(rename = "commodityUUID")]
    pub commodity_uuid: Option<String>,
    pub market: Option<String>,
    pub unit: Option<String>,
    pub price: Option<f64>,
    #[graphql(name = "recordedDate")]
    #[serde(
        skip_serializing_if = "MaybeUndefined::is_undefined",
        serialize_with = "super::clearable_date"
    )]
    pub recorded_date: MaybeUndefined<NaiveDate>,
}
