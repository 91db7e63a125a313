pub mod db_errors;

use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 rendering used for every timestamp leaving the service.
pub fn iso_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
