use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseTransaction, IntoActiveModel, TransactionTrait,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::{AppContext, RecordPayload};
use crate::auth::{Actor, RequestSession};
use crate::database::entities::activity_logs::ActivityAction;
use crate::errors::{CoreError, CoreResult};
use crate::records::{coerce, model_uuid, record_json, CoerceMode, ManagedEntity, COL_UUID};
use crate::services::ListQuery;

/// Outcome of a spreadsheet import; every row is written or none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub uuids: Vec<String>,
}

impl AppContext {
    // ----- Reads -----------------------------------------------------------

    /// Live records. A session without `<Resource>:Read` sees an empty list.
    pub async fn list_records<E: ManagedEntity>(
        &self,
        session: &RequestSession,
        query: &ListQuery,
    ) -> CoreResult<Vec<E::Model>> {
        if self.read_actor::<E>(session).await?.is_none() {
            return Ok(Vec::new());
        }
        self.record_service.list::<E>(query).await
    }

    /// `list_records` signed as `{"rows": [...]}`.
    pub async fn tokenized_list_records<E>(
        &self,
        session: &RequestSession,
        query: &ListQuery,
    ) -> CoreResult<String>
    where
        E: ManagedEntity,
        E::Model: Serialize,
    {
        let rows = self
            .list_records::<E>(session, query)
            .await?
            .iter()
            .map(record_json)
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(self.tokenizer.encode(&json!({ "rows": rows }))?)
    }

    pub async fn count_records<E>(
        &self,
        session: &RequestSession,
        search: Option<&str>,
    ) -> CoreResult<u64>
    where
        E: ManagedEntity,
        E::Model: Sync,
    {
        if self.read_actor::<E>(session).await?.is_none() {
            return Ok(0);
        }
        self.record_service.count::<E>(search).await
    }

    /// Direct lookup by uuid, soft-deleted records included.
    pub async fn get_record<E: ManagedEntity>(
        &self,
        session: &RequestSession,
        uuid: &str,
    ) -> CoreResult<Option<E::Model>> {
        if self.read_actor::<E>(session).await?.is_none() {
            return Ok(None);
        }
        self.record_service.find::<E>(uuid.trim()).await
    }

    // ----- Writes ----------------------------------------------------------

    pub async fn create_record<E>(
        &self,
        session: &RequestSession,
        payload: RecordPayload,
    ) -> CoreResult<E::Model>
    where
        E: ManagedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let actor = self.authorization_service.require_session(session)?;
        let input = self.decode_payload(payload)?;
        self.create_as::<E>(&actor, &input).await
    }

    /// Update a live record. The uuid comes from the argument, or from the
    /// payload itself for tokenized updates.
    pub async fn update_record<E>(
        &self,
        session: &RequestSession,
        uuid: Option<&str>,
        payload: RecordPayload,
    ) -> CoreResult<E::Model>
    where
        E: ManagedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let actor = self.authorization_service.require_session(session)?;
        let input = self.decode_payload(payload)?;
        let uuid = match uuid {
            Some(uuid) => uuid.trim().to_string(),
            None => payload_uuid(&input)?,
        };
        self.update_as::<E>(&actor, &uuid, &input).await
    }

    pub async fn delete_record<E>(
        &self,
        session: &RequestSession,
        uuid: &str,
    ) -> CoreResult<E::Model>
    where
        E: ManagedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let actor = self.authorization_service.require_session(session)?;
        self.delete_as::<E>(&actor, uuid.trim()).await
    }

    /// Delete the record named by the `uuid` claim of a signed payload.
    pub async fn tokenized_delete_record<E>(
        &self,
        session: &RequestSession,
        token: &str,
    ) -> CoreResult<E::Model>
    where
        E: ManagedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let actor = self.authorization_service.require_session(session)?;
        let input = self.decode_payload(RecordPayload::Tokenized(token.to_string()))?;
        let uuid = payload_uuid(&input)?;
        self.delete_as::<E>(&actor, &uuid).await
    }

    // ----- Spreadsheets ----------------------------------------------------

    /// Base64 workbook of the live records; header only when read is denied.
    pub async fn export_records<E>(&self, session: &RequestSession) -> CoreResult<String>
    where
        E: ManagedEntity,
        E::Model: Serialize,
    {
        let records = match self.read_actor::<E>(session).await? {
            Some(_) => self
                .record_service
                .list::<E>(&ListQuery::default())
                .await?
                .iter()
                .map(record_json)
                .collect::<CoreResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        self.spreadsheet_service
            .export(&E::table(), E::fields(), &records)
            .await
    }

    /// Create one record per workbook row inside a single transaction.
    pub async fn import_records<E>(
        &self,
        session: &RequestSession,
        encoded: &str,
    ) -> CoreResult<ImportSummary>
    where
        E: ManagedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let actor = self.authorization_service.require_session(session)?;
        let rows = self.spreadsheet_service.parse(E::fields(), encoded)?;

        let payloads = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                coerce(E::fields(), row, CoerceMode::Create)
                    .map_err(|e| e.with_field("row", (idx + 2).to_string()))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let txn = self.begin_for(&actor).await?;
        let mut uuids = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let model = self
                .record_service
                .create::<E>(&txn, &actor, payload, ActivityAction::Import)
                .await?;
            uuids.push(model_uuid::<E>(&model)?);
        }
        commit(txn, "import").await?;

        info!("Imported {} {} rows", uuids.len(), E::table());
        Ok(ImportSummary {
            imported: uuids.len(),
            uuids,
        })
    }

    // ----- Shared envelope -------------------------------------------------

    pub(crate) async fn create_as<E>(
        &self,
        actor: &Actor,
        input: &Map<String, Value>,
    ) -> CoreResult<E::Model>
    where
        E: ManagedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let payload = coerce(E::fields(), input, CoerceMode::Create)?;

        let txn = self.begin_for(actor).await?;
        let model = self
            .record_service
            .create::<E>(&txn, actor, payload, ActivityAction::Create)
            .await?;
        commit(txn, "create").await?;
        Ok(model)
    }

    pub(crate) async fn update_as<E>(
        &self,
        actor: &Actor,
        uuid: &str,
        input: &Map<String, Value>,
    ) -> CoreResult<E::Model>
    where
        E: ManagedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let payload = coerce(E::fields(), input, CoerceMode::Update)?;

        let txn = self.begin_for(actor).await?;
        let model = self
            .record_service
            .update::<E>(&txn, actor, uuid, payload)
            .await?;
        commit(txn, "update").await?;
        Ok(model)
    }

    async fn delete_as<E>(&self, actor: &Actor, uuid: &str) -> CoreResult<E::Model>
    where
        E: ManagedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let txn = self.begin_for(actor).await?;
        let model = self.record_service.delete::<E>(&txn, actor, uuid).await?;
        commit(txn, "delete").await?;
        Ok(model)
    }

    /// Open the write transaction and run the logged-in check inside it.
    pub(super) async fn begin_for(&self, actor: &Actor) -> CoreResult<DatabaseTransaction> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CoreError::database("begin transaction", e))?;
        self.authorization_service
            .require_logged_in(&txn, actor)
            .await?;
        Ok(txn)
    }

    async fn read_actor<E: ManagedEntity>(
        &self,
        session: &RequestSession,
    ) -> CoreResult<Option<Actor>> {
        debug!("Read {}", E::table());
        self.authorization_service
            .authorize_read(session, E::RESOURCE)
            .await
    }
}

pub(super) async fn commit(txn: DatabaseTransaction, operation: &str) -> CoreResult<()> {
    txn.commit()
        .await
        .map_err(|e| CoreError::database(&format!("commit {}", operation), e))
}

fn payload_uuid(input: &Map<String, Value>) -> CoreResult<String> {
    input
        .get(COL_UUID)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|uuid| !uuid.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            CoreError::validation("Please fill the uuid fields").with_field("field", COL_UUID)
        })
}
