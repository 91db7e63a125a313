//! Shared record envelope: every managed entity carries the same
//! `id`/`uuid`/timestamp/actor columns plus its own declared fields.

pub mod schema;

use std::str::FromStr;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, ModelTrait, QueryFilter,
    Value as DbValue,
};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::errors::{CoreError, CoreResult};
pub use schema::{coerce, CoerceMode, CoercedPayload, FieldDefault, FieldKind, FieldSpec, FieldValue};

pub const COL_ID: &str = "id";
pub const COL_UUID: &str = "uuid";
pub const COL_CREATED_AT: &str = "created_at";
pub const COL_UPDATED_AT: &str = "updated_at";
pub const COL_DELETED_AT: &str = "deleted_at";
pub const COL_CREATED_BY: &str = "created_by";
pub const COL_UPDATED_BY: &str = "updated_by";
pub const COL_DELETED_BY: &str = "deleted_by";

/// An entity managed through the record envelope.
#[async_trait]
pub trait ManagedEntity: EntityTrait + Default + Send + Sync {
    /// Resource part of the `"<Resource>:<Verb>"` privilege.
    const RESOURCE: &'static str;
    /// Name used in messages, e.g. `"Farmer profile"`.
    const DISPLAY: &'static str;

    fn fields() -> &'static [FieldSpec];

    /// Columns matched by the `search` argument of list queries.
    fn search_columns() -> &'static [&'static str] {
        &[]
    }

    /// Entity rules checked inside the write transaction.
    /// `current` is the uuid of the record being updated.
    async fn validate(
        _txn: &DatabaseTransaction,
        _payload: &CoercedPayload,
        _current: Option<&str>,
    ) -> CoreResult<()> {
        Ok(())
    }

    fn table() -> String {
        Self::default().table_name().to_string()
    }
}

/// Resolve a column by its database name.
pub fn column<E: EntityTrait>(name: &str) -> CoreResult<E::Column> {
    E::Column::from_str(name).map_err(|_| {
        CoreError::internal(format!(
            "Column '{}' missing on {}",
            name,
            E::default().table_name()
        ))
    })
}

pub fn model_text<E: EntityTrait>(model: &E::Model, name: &str) -> CoreResult<String> {
    match model.get(column::<E>(name)?) {
        DbValue::String(Some(value)) => Ok(*value),
        DbValue::String(None) => Ok(String::new()),
        other => Err(CoreError::internal(format!(
            "Column '{}' is not text: {:?}",
            name, other
        ))),
    }
}

pub fn model_uuid<E: EntityTrait>(model: &E::Model) -> CoreResult<String> {
    model_text::<E>(model, COL_UUID)
}

pub fn is_live<E: EntityTrait>(model: &E::Model) -> CoreResult<bool> {
    Ok(model_text::<E>(model, COL_DELETED_AT)?.is_empty())
}

/// JSON rendering of a stored record; `id` is stringified.
pub fn record_json<M: Serialize>(model: &M) -> CoreResult<JsonValue> {
    let mut value = serde_json::to_value(model)
        .map_err(|e| CoreError::internal(format!("Failed to serialize record: {}", e)))?;
    if let Some(map) = value.as_object_mut() {
        let id = match map.get(COL_ID) {
            Some(JsonValue::Number(id)) => Some(id.to_string()),
            _ => None,
        };
        if let Some(id) = id {
            map.insert(COL_ID.to_string(), JsonValue::String(id));
        }
    }
    Ok(value)
}

/// Fail with `"Duplicate <label>"` when another live record already holds `value`.
pub async fn ensure_unique_live<E, C>(
    conn: &C,
    column_name: &str,
    value: &str,
    label: &str,
    current: Option<&str>,
) -> CoreResult<()>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut query = E::find()
        .filter(column::<E>(column_name)?.eq(value))
        .filter(column::<E>(COL_DELETED_AT)?.eq(""));
    if let Some(current) = current {
        query = query.filter(column::<E>(COL_UUID)?.ne(current));
    }

    let existing = query
        .one(conn)
        .await
        .map_err(|e| CoreError::database("uniqueness check", e))?;

    match existing {
        Some(_) => Err(CoreError::conflict(format!("Duplicate {}", label))
            .with_field("field", column_name)),
        None => Ok(()),
    }
}

/// Fail unless `uuid` names a live record of `E`.
pub async fn ensure_live_reference<E, C>(conn: &C, uuid: &str, label: &str) -> CoreResult<()>
where
    E: ManagedEntity,
    C: ConnectionTrait,
{
    let found = E::find()
        .filter(column::<E>(COL_UUID)?.eq(uuid))
        .filter(column::<E>(COL_DELETED_AT)?.eq(""))
        .one(conn)
        .await
        .map_err(|e| CoreError::database("reference check", e))?;

    match found {
        Some(_) => Ok(()),
        None => Err(CoreError::not_found(E::DISPLAY, uuid).with_field("field", label)),
    }
}
