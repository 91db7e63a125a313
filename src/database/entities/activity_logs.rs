use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::ActorSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    Import,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Create => "CREATE",
            ActivityAction::Update => "UPDATE",
            ActivityAction::Delete => "DELETE",
            ActivityAction::Import => "IMPORT",
        }
    }
}

/// Append-only audit entry, one per mutation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_logs")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: String,
    #[serde(rename = "actorUUID")]
    pub actor_uuid: String,
    pub actor_username: String,
    pub action: String,
    pub table_name: String,
    #[serde(rename = "recordUUID")]
    pub record_uuid: String,
    pub data_snapshot: Json,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(
        actor: &ActorSnapshot,
        action: ActivityAction,
        table_name: &str,
        record_uuid: &str,
        data_snapshot: Json,
    ) -> Self {
        Self {
            id: ActiveValue::NotSet,
            uuid: Set(Uuid::new_v4().to_string()),
            actor_uuid: Set(actor.uuid.clone()),
            actor_username: Set(actor.username.clone()),
            action: Set(action.as_str().to_string()),
            table_name: Set(table_name.to_string()),
            record_uuid: Set(record_uuid.to_string()),
            data_snapshot: Set(data_snapshot),
            created_at: Set(Utc::now()),
        }
    }
}
