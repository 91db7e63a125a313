use async_graphql::*;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::{ActorRef, FarmerProfile};
use crate::database::entities::{crop_productions, farmer_profiles, livestock_productions};
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;

async fn load_farmer(ctx: &Context<'_>, uuid: &str) -> Result<Option<FarmerProfile>> {
    let context = ctx.data::<GraphQLContext>()?;
    let farmer = context
        .app
        .get_record::<farmer_profiles::Entity>(&context.session(ctx), uuid)
        .await
        .map_err(StructuredError::from_core_error)?;

    Ok(farmer.map(FarmerProfile::from))
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct CropProduction {
    pub id: String,
    pub uuid: String,
    #[graphql(name = "farmerUUID")]
    pub farmer_uuid: String,
    #[graphql(name = "cropName")]
    pub crop_name: String,
    #[graphql(name = "cropCategory")]
    pub crop_category: String,
    #[graphql(name = "plantedArea")]
    pub planted_area: f64,
    #[graphql(name = "quantityKg")]
    pub quantity_kg: f64,
    #[graphql(name = "productionValue")]
    pub production_value: f64,
    #[graphql(name = "productionDate")]
    pub production_date: Option<NaiveDate>,
    pub remarks: String,
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

impl From<crop_productions::Model> for CropProduction {
    fn from(model: crop_productions::Model) -> Self {
        Self {
            id: model.id.to_string(),
            uuid: model.uuid,
            farmer_uuid: model.farmer_uuid,
            crop_name: model.crop_name,
            crop_category: model.crop_category,
            planted_area: model.planted_area,
            quantity_kg: model.quantity_kg,
            production_value: model.production_value,
            production_date: model.production_date,
            remarks: model.remarks,
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
impl CropProduction {
    async fn farmer(&self, ctx: &Context<'_>) -> Result<Option<FarmerProfile>> {
        load_farmer(ctx, &self.farmer_uuid).await
    }
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CropProductionInput {
    #[graphql(name = "farmerUUID")]
    #[serde(rename = "farmerUUID")]
    pub farmer_uuid: Option<String>,
    #[graphql(name = "cropName")]
    pub crop_name: Option<String>,
    #[graphql(name = "cropCategory")]
    pub crop_category: Option<String>,
    #[graphql(name = "plantedArea")]
    pub planted_area: Option<f64>,
    #[graphql(name = "quantityKg")]
    pub quantity_kg: Option<f64>,
    #[graphql(name = "productionValue")]
    pub production_value: Option<f64>,
    #[graphql(name = "productionDate")]
    #[serde(
        skip_serializing_if = "MaybeUndefined::is_undefined",
        serialize_with = "super::clearable_date"
    )]
    pub production_date: MaybeUndefined<NaiveDate>,
    pub remarks: Option<String>,
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct LivestockProduction {
    pub id: String,
    pub uuid: String,
    #[graphql(name = "farmerUUID")]
    pub farmer_uuid: String,
    #[graphql(name = "livestockType")]
    pub livestock_type: String,
    #[graphql(name = "headCount")]
    pub head_count: i64,
    #[graphql(name = "quantityKg")]
    pub quantity_kg: f64,
    #[graphql(name = "productionValue")]
    pub production_value: f64,
    #[graphql(name = "productionDate")]
    pub production_date: Option<NaiveDate>,
    pub remarks: String,
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

impl From<livestock_productions::Model> for LivestockProduction {
    fn from(model: livestock_productions::Model) -> Self {
        Self {
            id: model.id.to_string(),
            uuid: model.uuid,
            farmer_uuid: model.farmer_uuid,
            livestock_type: model.livestock_type,
            head_count: model.head_count,
            quantity_kg: model.quantity_kg,
            production_value: model.production_value,
            production_date: model.production_date,
            remarks: model.remarks,
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
impl LivestockProduction {
    async fn farmer(&self, ctx: &Context<'_>) -> Result<Option<FarmerProfile>> {
        load_farmer(ctx, &self.farmer_uuid).await
    }
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct LivestockProductionInput {
    #[graphql(name = "farmerUUID")]
    #[serde(rename = "farmerUUID")]
    pub farmer_uuid: Option<String>,
    #[graphql(name = "livestockType")]
    pub livestock_type: Option<String>,
    #[graphql(name = "headCount")]
    pub head_count: Option<i64>,
    #[graphql(name = "quantityKg")]
    pub quantity_kg: Option<f64>,
    #[graphql(name = "productionValue")]
    pub production_value: Option<f64>,
    #[graphql(name = "productionDate")]
    #[serde(
        skip_serializing_if = "MaybeUndefined::is_undefined",
        serialize_with = "super::clearable_date"
    )]
    pub production_date: MaybeUndefined<NaiveDate>,
    pub remarks: Option<String>,
}
