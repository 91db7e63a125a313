use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use serde_json::Value;
use tracing::debug;

use crate::auth::ActorSnapshot;
use crate::database::entities::activity_logs::{self, ActivityAction};
use crate::errors::{CoreError, CoreResult};

#[derive(Clone, Debug, Default)]
pub struct ActivityLogFilter {
    pub table_name: Option<String>,
    pub record_uuid: Option<String>,
    pub action: Option<String>,
}

/// Append-only audit trail. Entries are never updated or deleted.
#[derive(Clone)]
pub struct ActivityLogService {
    db: DatabaseConnection,
}

impl ActivityLogService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append an entry on `conn`, normally the transaction holding the write.
    pub async fn append<C: ConnectionTrait>(
        conn: &C,
        actor: &ActorSnapshot,
        action: ActivityAction,
        table_name: &str,
        record_uuid: &str,
        snapshot: Value,
    ) -> CoreResult<activity_logs::Model> {
        debug!(
            "Activity {} on {} {} by {}",
            action.as_str(),
            table_name,
            record_uuid,
            actor.username
        );

        activity_logs::ActiveModel::new(actor, action, table_name, record_uuid, snapshot)
            .insert(conn)
            .await
            .map_err(|e| CoreError::database("append activity log", e))
    }

    pub async fn list(
        &self,
        filter: &ActivityLogFilter,
        skip: u64,
        take: Option<u64>,
    ) -> CoreResult<Vec<activity_logs::Model>> {
        let mut query = Self::filtered(filter)
            .order_by_desc(activity_logs::Column::CreatedAt)
            .order_by_desc(activity_logs::Column::Id)
            .offset(skip);
        if let Some(take) = take {
            query = query.limit(take);
        }

        query
            .all(&self.db)
            .await
            .map_err(|e| CoreError::database("list activity logs", e))
    }

    pub async fn count(&self, filter: &ActivityLogFilter) -> CoreResult<u64> {
        Self::filtered(filter)
            .count(&self.db)
            .await
            .map_err(|e| CoreError::database("count activity logs", e))
    }

    fn filtered(filter: &ActivityLogFilter) -> Select<activity_logs::Entity> {
        let mut query = activity_logs::Entity::find();
        if let Some(table_name) = &filter.table_name {
            query = query.filter(activity_logs::Column::TableName.eq(table_name.as_str()));
        }
        if let Some(record_uuid) = &filter.record_uuid {
            query = query.filter(activity_logs::Column::RecordUuid.eq(record_uuid.as_str()));
        }
        if let Some(action) = &filter.action {
            query = query.filter(activity_logs::Column::Action.eq(action.to_uppercase()));
        }
        query
    }
}
