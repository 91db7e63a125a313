pub mod activity;
pub mod auth;
pub mod commodities;
pub mod production;
pub mod profiles;

pub use activity::*;
pub use auth::*;
pub use commodities::*;
pub use production::*;
pub use profiles::*;

use async_graphql::*;
use chrono::NaiveDate;
use serde_json::Value as JsonValue;

use crate::app_context::ImportSummary;

/// Actor snapshot stored on a record: `{uuid, username}`.
#[derive(SimpleObject, Clone, Debug, Default, PartialEq, Eq)]
pub struct ActorRef {
    pub uuid: String,
    pub username: String,
}

impl ActorRef {
    pub fn from_json(value: &JsonValue) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(JsonValue::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            uuid: text("uuid"),
            username: text("username"),
        }
    }

    pub fn from_optional(value: Option<&JsonValue>) -> Option<Self> {
        value.filter(|value| !value.is_null()).map(Self::from_json)
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct ImportResult {
    pub imported: i32,
    pub uuids: Vec<String>,
}

impl From<ImportSummary> for ImportResult {
    fn from(summary: ImportSummary) -> Self {
        Self {
            imported: summary.imported as i32,
            uuids: summary.uuids,
        }
    }
}

/// Serializer for optional date inputs. An explicit `null` becomes `""`,
/// which record coercion stores as no date; absent fields are skipped.
pub(crate) fn clearable_date<S: serde::Serializer>(
    value: &MaybeUndefined<NaiveDate>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        MaybeUndefined::Value(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
        MaybeUndefined::Null | MaybeUndefined::Undefined => serializer.serialize_str(""),
    }
}
