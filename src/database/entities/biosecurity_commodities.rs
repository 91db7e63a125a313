use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::records::{FieldDefault, FieldSpec, ManagedEntity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "biosecurity_commodities")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: String,
    pub name: String,
    pub category: String,
    pub hs_code: String,
    pub scientific_name: String,
    pub risk_level: String,
    pub description: String,
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
    FieldSpec::text("name", "name", "commodity name").required(),
    FieldSpec::text("category", "category", "category"),
    FieldSpec::text("hsCode", "hs_code", "HS code"),
    FieldSpec::text("scientificName", "scientific_name", "scientific name"),
    FieldSpec::text("riskLevel", "risk_level", "risk level").with_default(FieldDefault::Text("Low")),
    FieldSpec::text("description", "description", "description"),
];

#[async_trait]
impl ManagedEntity for Entity {
    const RESOURCE: &'static str = "BiosecurityCommodity";
    const DISPLAY: &'static str = "Biosecurity commodity";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn search_columns() -> &'static [&'static str] {
        &["name", "category", "hs_code", "scientific_name"]
    }
}
