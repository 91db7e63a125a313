use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::DatabaseTransaction;
use serde::{Deserialize, Serialize};

use crate::errors::CoreResult;
use crate::records::{ensure_unique_live, CoercedPayload, FieldSpec, ManagedEntity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_roles")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: String,
    pub name: String,
    /// JSON array of `"<Resource>:<Verb>"` strings.
    pub privileges: Json,
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

impl Model {
    pub fn privilege_list(&self) -> Vec<String> {
        self.privileges
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "name", "role name").required(),
    FieldSpec::list("privileges", "privileges", "privileges"),
];

#[async_trait]
impl ManagedEntity for Entity {
    const RESOURCE: &'static str = "UserRole";
    const DISPLAY: &'static str = "User role";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn search_columns() -> &'static [&'static str] {
        &["name"]
    }

    async fn validate(
        txn: &DatabaseTransaction,
        payload: &CoercedPayload,
        current: Option<&str>,
    ) -> CoreResult<()> {
        if let Some(name) = payload.text("name") {
            ensure_unique_live::<Entity, _>(txn, "name", name, "role name", current).await?;
        }
        Ok(())
    }
}
