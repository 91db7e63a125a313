use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::records::{FieldSpec, ManagedEntity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_profiles")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: String,
    pub company_name: String,
    pub registration_no: String,
    pub address: String,
    pub district: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
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
    FieldSpec::text("companyName", "company_name", "company name").required(),
    FieldSpec::text("registrationNo", "registration_no", "registration no"),
    FieldSpec::text("address", "address", "address"),
    FieldSpec::text("district", "district", "district"),
    FieldSpec::text("contactPerson", "contact_person", "contact person"),
    FieldSpec::text("phone", "phone", "phone"),
    FieldSpec::text("email", "email", "email"),
];

#[async_trait]
impl ManagedEntity for Entity {
    const RESOURCE: &'static str = "CompanyProfile";
    const DISPLAY: &'static str = "Company profile";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn search_columns() -> &'static [&'static str] {
        &["company_name", "registration_no", "district"]
    }
}
