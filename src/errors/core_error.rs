use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use sea_orm::DbErr;

use crate::common::db_errors::{classify, DbErrorKind};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreErrorKind {
    NotFound,
    Validation,
    Conflict,
    Forbidden,
    Unauthorized,
    Unavailable,
    Internal,
}

/// Error type shared by every service and resolver.
///
/// The message is what callers see; it intentionally keeps the short
/// human phrasing clients already match on ("Invalid Session",
/// "Duplicate ROCBN Reg. No", ...). The kind drives the machine-readable
/// code attached at the GraphQL boundary.
#[derive(Debug)]
pub struct CoreError {
    kind: CoreErrorKind,
    message: String,
    fields: Option<BTreeMap<String, String>>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl CoreError {
    pub fn new(kind: CoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: None,
            source: None,
        }
    }

    /// `"<Entity> not found"`, with the entity and identifier kept as fields.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        let entity = entity.into();
        let mut fields = BTreeMap::new();
        fields.insert("entity".to_string(), entity.clone());
        fields.insert("id".to_string(), id.into());

        Self {
            kind: CoreErrorKind::NotFound,
            message: format!("{} not found", entity),
            fields: Some(fields),
            source: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Validation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Conflict, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Forbidden, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Unauthorized, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Unavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Internal, message)
    }

    /// Map a database failure during `operation` onto a kind callers can act on.
    pub fn database(operation: &str, err: DbErr) -> Self {
        let failure = classify(operation, &err);
        let kind = match failure.kind {
            DbErrorKind::NotFound => CoreErrorKind::NotFound,
            DbErrorKind::UniqueViolation => CoreErrorKind::Conflict,
            DbErrorKind::Busy | DbErrorKind::Unavailable => CoreErrorKind::Unavailable,
            DbErrorKind::Other => CoreErrorKind::Internal,
        };

        let mut error = Self::new(kind, failure.message);
        if let Some(column) = failure.column {
            error = error.with_field("column", column);
        }
        error.with_source(err)
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> CoreErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> Option<&BTreeMap<String, String>> {
        self.fields.as_ref()
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl StdError for CoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<anyhow::Error> for CoreError {
    fn from(err: anyhow::Error) -> Self {
        let mut core = CoreError::internal("Unhandled error");
        core.source = Some(err.into());
        core
    }
}
