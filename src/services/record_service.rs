use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Value as DbValue,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::auth::Actor;
use crate::common::iso_timestamp;
use crate::database::entities::activity_logs::ActivityAction;
use crate::errors::{CoreError, CoreResult};
use crate::records::{
    column, model_uuid, record_json, CoercedPayload, ManagedEntity, COL_CREATED_AT,
    COL_CREATED_BY, COL_DELETED_AT, COL_DELETED_BY, COL_ID, COL_UPDATED_AT, COL_UPDATED_BY,
    COL_UUID,
};
use crate::services::activity_log_service::ActivityLogService;

/// Pagination and search for list queries.
#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    pub skip: u64,
    pub take: Option<u64>,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(skip: Option<i64>, take: Option<i64>, search: Option<String>) -> Self {
        Self {
            skip: skip.unwrap_or(0).max(0) as u64,
            take: take.filter(|take| *take > 0).map(|take| take as u64),
            search: search
                .map(|term| term.trim().to_string())
                .filter(|term| !term.is_empty()),
        }
    }
}

/// Envelope-aware reads and writes for every [`ManagedEntity`].
///
/// Writes run on a caller-supplied transaction and append their activity
/// log entry on the same transaction.
#[derive(Clone)]
pub struct RecordService {
    db: DatabaseConnection,
}

impl RecordService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Live records, newest first.
    pub async fn list<E: ManagedEntity>(&self, query: &ListQuery) -> CoreResult<Vec<E::Model>> {
        let mut select = Self::live::<E>(query.search.as_deref())?
            .order_by_desc(column::<E>(COL_CREATED_AT)?)
            .order_by_desc(column::<E>(COL_ID)?)
            .offset(query.skip);
        if let Some(take) = query.take {
            select = select.limit(take);
        }

        select
            .all(&self.db)
            .await
            .map_err(|e| CoreError::database(&format!("list {}", E::table()), e))
    }

    pub async fn count<E>(&self, search: Option<&str>) -> CoreResult<u64>
    where
        E: ManagedEntity,
        E::Model: Sync,
    {
        Self::live::<E>(search)?
            .count(&self.db)
            .await
            .map_err(|e| CoreError::database(&format!("count {}", E::table()), e))
    }

    /// Direct lookup, soft-deleted records included.
    pub async fn find<E: ManagedEntity>(&self, uuid: &str) -> CoreResult<Option<E::Model>> {
        E::find()
            .filter(column::<E>(COL_UUID)?.eq(uuid))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database(&format!("find {}", E::table()), e))
    }

    pub async fn create<E>(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        payload: CoercedPayload,
        action: ActivityAction,
    ) -> CoreResult<E::Model>
    where
        E: ManagedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        E::validate(txn, &payload, None).await?;

        let now = Utc::now();
        let snapshot = actor_json(actor)?;
        let mut active = <E::ActiveModel as ActiveModelBehavior>::new();
        active.set(column::<E>(COL_UUID)?, Uuid::new_v4().to_string().into());
        active.set(column::<E>(COL_CREATED_AT)?, now.into());
        active.set(column::<E>(COL_UPDATED_AT)?, now.into());
        active.set(column::<E>(COL_DELETED_AT)?, String::new().into());
        active.set(column::<E>(COL_CREATED_BY)?, snapshot.clone().into());
        active.set(column::<E>(COL_UPDATED_BY)?, snapshot.into());
        active.set(column::<E>(COL_DELETED_BY)?, DbValue::Json(None));
        for (name, value) in payload.into_columns() {
            active.set(column::<E>(name)?, value);
        }

        let model = active
            .insert(txn)
            .await
            .map_err(|e| CoreError::database(&format!("insert {}", E::table()), e))?;

        self.audit::<E>(txn, actor, action, &model).await?;
        Ok(model)
    }

    /// Overwrite the fields present in `payload` on a live record.
    pub async fn update<E>(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        uuid: &str,
        payload: CoercedPayload,
    ) -> CoreResult<E::Model>
    where
        E: ManagedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let existing = Self::live_by_uuid::<E>(txn, uuid).await?;
        E::validate(txn, &payload, Some(uuid)).await?;

        let mut active = existing.into_active_model();
        for (name, value) in payload.into_columns() {
            active.set(column::<E>(name)?, value);
        }
        active.set(column::<E>(COL_UPDATED_AT)?, Utc::now().into());
        active.set(column::<E>(COL_UPDATED_BY)?, actor_json(actor)?.into());

        let model = active
            .update(txn)
            .await
            .map_err(|e| CoreError::database(&format!("update {}", E::table()), e))?;

        self.audit::<E>(txn, actor, ActivityAction::Update, &model)
            .await?;
        Ok(model)
    }

    /// Soft delete: stamp `deletedAt`/`deletedBy`, keep the row.
    pub async fn delete<E>(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        uuid: &str,
    ) -> CoreResult<E::Model>
    where
        E: ManagedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let existing = Self::live_by_uuid::<E>(txn, uuid).await?;

        let mut active = existing.into_active_model();
        active.set(column::<E>(COL_DELETED_AT)?, iso_timestamp(&Utc::now()).into());
        active.set(
            column::<E>(COL_DELETED_BY)?,
            DbValue::Json(Some(Box::new(actor_json(actor)?))),
        );

        let model = active
            .update(txn)
            .await
            .map_err(|e| CoreError::database(&format!("delete {}", E::table()), e))?;

        self.audit::<E>(txn, actor, ActivityAction::Delete, &model)
            .await?;
        Ok(model)
    }

    async fn audit<E>(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        action: ActivityAction,
        model: &E::Model,
    ) -> CoreResult<()>
    where
        E: ManagedEntity,
        E::Model: Serialize + Sync,
    {
        let record_uuid = model_uuid::<E>(model)?;
        debug!("{} {} {}", action.as_str(), E::table(), record_uuid);
        ActivityLogService::append(
            txn,
            &actor.snapshot(),
            action,
            &E::table(),
            &record_uuid,
            record_json(model)?,
        )
        .await?;
        Ok(())
    }

    async fn live_by_uuid<E: ManagedEntity>(
        txn: &DatabaseTransaction,
        uuid: &str,
    ) -> CoreResult<E::Model> {
        E::find()
            .filter(column::<E>(COL_UUID)?.eq(uuid))
            .filter(column::<E>(COL_DELETED_AT)?.eq(""))
            .one(txn)
            .await
            .map_err(|e| CoreError::database(&format!("find {}", E::table()), e))?
            .ok_or_else(|| CoreError::not_found(E::DISPLAY, uuid))
    }

    fn live<E: ManagedEntity>(search: Option<&str>) -> CoreResult<Select<E>> {
        let mut select = E::find().filter(column::<E>(COL_DELETED_AT)?.eq(""));

        if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
            let mut any = Condition::any();
            for name in E::search_columns() {
                any = any.add(column::<E>(name)?.contains(term));
            }
            if !E::search_columns().is_empty() {
                select = select.filter(any);
            }
        }

        Ok(select)
    }
}

fn actor_json(actor: &Actor) -> CoreResult<serde_json::Value> {
    serde_json::to_value(actor.snapshot())
        .map_err(|e| CoreError::internal(format!("Failed to serialize actor: {}", e)))
}
