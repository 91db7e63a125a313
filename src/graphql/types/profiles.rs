use async_graphql::*;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::ActorRef;
use crate::database::entities::{company_profiles, farmer_profiles};
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;

#[derive(SimpleObject, Clone, Debug)]
pub struct CompanyProfile {
    pub id: String,
    pub uuid: String,
    #[graphql(name = "companyName")]
    pub company_name: String,
    #[graphql(name = "registrationNo")]
    pub registration_no: String,
    pub address: String,
    pub district: String,
    #[graphql(name = "contactPerson")]
    pub contact_person: String,
    pub phone: String,
    pub email: String,
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

impl From<company_profiles::Model> for CompanyProfile {
    fn from(model: company_profiles::Model) -> Self {
        Self {
            id: model.id.to_string(),
            uuid: model.uuid,
            company_name: model.company_name,
            registration_no: model.registration_no,
            address: model.address,
            district: model.district,
            contact_person: model.contact_person,
            phone: model.phone,
            email: model.email,
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
pub struct CompanyProfileInput {
    #[graphql(name = "companyName")]
    pub company_name: Option<String>,
    #[graphql(name = "registrationNo")]
    pub registration_no: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
    #[graphql(name = "contactPerson")]
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct FarmerProfile {
    pub id: String,
    pub uuid: String,
    #[graphql(name = "rocbnRegNo")]
    pub rocbn_reg_no: String,
    #[graphql(name = "farmerName")]
    pub farmer_name: String,
    #[graphql(name = "icNo")]
    pub ic_no: String,
    #[graphql(name = "companyUUID")]
    pub company_uuid: String,
    #[graphql(name = "farmLocation")]
    pub farm_location: String,
    pub district: String,
    pub mukim: String,
    pub phone: String,
    #[graphql(name = "farmArea")]
    pub farm_area: f64,
    #[graphql(name = "registeredDate")]
    pub registered_date: Option<NaiveDate>,
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

impl From<farmer_profiles::Model> for FarmerProfile {
    fn from(model: farmer_profiles::Model) -> Self {
        Self {
            id: model.id.to_string(),
            uuid: model.uuid,
            rocbn_reg_no: model.rocbn_reg_no,
            farmer_name: model.farmer_name,
            ic_no: model.ic_no,
            company_uuid: model.company_uuid,
            farm_location: model.farm_location,
            district: model.district,
            mukim: model.mukim,
            phone: model.phone,
            farm_area: model.farm_area,
            registered_date: model.registered_date,
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
impl FarmerProfile {
    /// The linked company, when `companyUUID` is set and readable.
    async fn company(&self, ctx: &Context<'_>) -> Result<Option<CompanyProfile>> {
        if self.company_uuid.is_empty() {
            return Ok(None);
        }
        let context = ctx.data::<GraphQLContext>()?;
        let company = context
            .app
            .get_record::<company_profiles::Entity>(&context.session(ctx), &self.company_uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(company.map(CompanyProfile::from))
    }
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfileInput {
    #[graphql(name = "rocbnRegNo")]
    pub rocbn_reg_no: Option<String>,
    #[graphql(name = "farmerName")]
    pub farmer_name: Option<String>,
    #[graphql(name = "icNo")]
    pub ic_no: Option<String>,
    #[graphql(name = "companyUUID")]
    #[serde(rename = "companyUUID")]
    pub company_uuid: Option<String>,
    #[graphql(name = "farmLocation")]
    pub farm_location: Option<String>,
    pub district: Option<String>,
    pub mukim: Option<String>,
    pub phone: Option<String>,
    #[graphql(name = "farmArea")]
    pub farm_area: Option<f64>,
    #[graphql(name = "registeredDate")]
    #[serde(
        skip_serializing_if = "MaybeUndefined::is_undefined",
        serialize_with = "super::clearable_date"
    )]
    pub registered_date: MaybeUndefined<NaiveDate>,
}
