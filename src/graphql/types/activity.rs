use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::database::entities::activity_logs;
use crate::services::ActivityLogFilter;

#[derive(SimpleObject, Clone, Debug)]
pub struct ActivityLog {
    pub id: String,
    pub uuid: String,
    #[graphql(name = "actorUUID")]
    pub actor_uuid: String,
    #[graphql(name = "actorUsername")]
    pub actor_username: String,
    pub action: String,
    #[graphql(name = "tableName")]
    pub table_name: String,
    #[graphql(name = "recordUUID")]
    pub record_uuid: String,
    #[graphql(name = "dataSnapshot")]
    pub data_snapshot: Json<serde_json::Value>,
    #[graphql(name = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<activity_logs::Model> for ActivityLog {
    fn from(model: activity_logs::Model) -> Self {
        Self {
            id: model.id.to_string(),
            uuid: model.uuid,
            actor_uuid: model.actor_uuid,
            actor_username: model.actor_username,
            action: model.action,
            table_name: model.table_name,
            record_uuid: model.record_uuid,
            data_snapshot: Json(model.data_snapshot),
            created_at: model.created_at,
        }
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct ActivityLogFilterInput {
    #[graphql(name = "tableName")]
    pub table_name: Option<String>,
    #[graphql(name = "recordUUID")]
    pub record_uuid: Option<String>,
    pub action: Option<String>,
}

impl From<ActivityLogFilterInput> for ActivityLogFilter {
    fn from(input: ActivityLogFilterInput) -> Self {
        Self {
            table_name: input.table_name,
            record_uuid: input.record_uuid,
            action: input.action,
        }
    }
}
