//! Declarative field schemas and the coercion applied to incoming payloads.
//!
//! Each managed entity lists its writable fields once. [`coerce`] turns a
//! loose JSON object (GraphQL input, decoded token or spreadsheet row) into
//! typed column values, dropping anything the schema does not name.

use chrono::{DateTime, NaiveDate};
use indexmap::IndexMap;
use sea_orm::Value as DbValue;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::{CoreError, CoreResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Uuid,
    Integer,
    Float,
    Date,
    Bool,
    StringList,
}

/// Value used when a field is absent on create.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldDefault {
    Text(&'static str),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    /// External (GraphQL/JSON) name.
    pub name: &'static str,
    pub column: &'static str,
    /// Human label used in messages and spreadsheet headers.
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<FieldDefault>,
}

impl FieldSpec {
    pub const fn new(
        name: &'static str,
        column: &'static str,
        label: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            column,
            label,
            kind,
            required: false,
            default: None,
        }
    }

    pub const fn text(name: &'static str, column: &'static str, label: &'static str) -> Self {
        Self::new(name, column, label, FieldKind::Text)
    }

    pub const fn uuid(name: &'static str, column: &'static str, label: &'static str) -> Self {
        Self::new(name, column, label, FieldKind::Uuid)
    }

    pub const fn integer(name: &'static str, column: &'static str, label: &'static str) -> Self {
        Self::new(name, column, label, FieldKind::Integer)
    }

    pub const fn float(name: &'static str, column: &'static str, label: &'static str) -> Self {
        Self::new(name, column, label, FieldKind::Float)
    }

    pub const fn date(name: &'static str, column: &'static str, label: &'static str) -> Self {
        Self::new(name, column, label, FieldKind::Date)
    }

    pub const fn boolean(name: &'static str, column: &'static str, label: &'static str) -> Self {
        Self::new(name, column, label, FieldKind::Bool)
    }

    pub const fn list(name: &'static str, column: &'static str, label: &'static str) -> Self {
        Self::new(name, column, label, FieldKind::StringList)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = Some(default);
        self
    }

    fn missing_error(&self) -> CoreError {
        CoreError::validation(format!("Please fill the {} fields", self.label))
            .with_field("field", self.name)
    }

    fn invalid_error(&self, detail: &str) -> CoreError {
        CoreError::validation(format!("Invalid {}: {}", self.label, detail))
            .with_field("field", self.name)
    }

    fn default_value(&self) -> FieldValue {
        match (self.kind, self.default) {
            (_, Some(FieldDefault::Text(value))) => FieldValue::Text(value.to_string()),
            (_, Some(FieldDefault::Integer(value))) => FieldValue::Integer(value),
            (_, Some(FieldDefault::Float(value))) => FieldValue::Float(value),
            (_, Some(FieldDefault::Bool(value))) => FieldValue::Bool(value),
            (FieldKind::Text | FieldKind::Uuid, None) => FieldValue::Text(String::new()),
            (FieldKind::Integer, None) => FieldValue::Integer(0),
            (FieldKind::Float, None) => FieldValue::Float(0.0),
            (FieldKind::Date, None) => FieldValue::Date(None),
            (FieldKind::Bool, None) => FieldValue::Bool(false),
            (FieldKind::StringList, None) => FieldValue::StringList(Vec::new()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(Option<NaiveDate>),
    Bool(bool),
    StringList(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Column value matching the entity's model type for this kind.
    pub fn into_db_value(self) -> DbValue {
        match self {
            FieldValue::Text(value) => value.into(),
            FieldValue::Integer(value) => value.into(),
            FieldValue::Float(value) => value.into(),
            FieldValue::Date(value) => value.into(),
            FieldValue::Bool(value) => value.into(),
            FieldValue::StringList(values) => Value::from(values).into(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(value) => Value::String(value.clone()),
            FieldValue::Integer(value) => Value::from(*value),
            FieldValue::Float(value) => Value::from(*value),
            FieldValue::Date(Some(value)) => Value::String(value.format("%Y-%m-%d").to_string()),
            FieldValue::Date(None) => Value::Null,
            FieldValue::Bool(value) => Value::Bool(*value),
            FieldValue::StringList(values) => Value::from(values.clone()),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.trim().is_empty(),
            FieldValue::Date(value) => value.is_none(),
            FieldValue::StringList(values) => values.is_empty(),
            FieldValue::Integer(_) | FieldValue::Float(_) | FieldValue::Bool(_) => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoerceMode {
    /// Every field is written; absent ones take their default.
    Create,
    /// Only fields present in the input are written.
    Update,
}

/// Typed values keyed by field, in schema order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoercedPayload {
    values: IndexMap<&'static str, (FieldSpec, FieldValue)>,
}

impl CoercedPayload {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name).map(|(_, value)| value)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldSpec, &FieldValue)> {
        self.values.values().map(|(spec, value)| (spec, value))
    }

    pub fn into_columns(self) -> impl Iterator<Item = (&'static str, DbValue)> {
        self.values
            .into_values()
            .map(|(spec, value)| (spec.column, value.into_db_value()))
    }

    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(name, (_, value))| (name.to_string(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}

/// Coerce `input` against `fields`.
///
/// Missing or blank required fields fail with
/// `"Please fill the <label> fields"` in both modes.
pub fn coerce(
    fields: &[FieldSpec],
    input: &Map<String, Value>,
    mode: CoerceMode,
) -> CoreResult<CoercedPayload> {
    let mut values = IndexMap::with_capacity(fields.len());

    for spec in fields {
        let raw = input.get(spec.name).filter(|value| !value.is_null());

        let value = match raw {
            Some(raw) => coerce_value(spec, raw)?,
            None if spec.required => return Err(spec.missing_error()),
            None if mode == CoerceMode::Update && !input.contains_key(spec.name) => continue,
            None => spec.default_value(),
        };

        if spec.required && value.is_blank() {
            return Err(spec.missing_error());
        }

        values.insert(spec.name, (*spec, value));
    }

    Ok(CoercedPayload { values })
}

fn coerce_value(spec: &FieldSpec, raw: &Value) -> CoreResult<FieldValue> {
    match spec.kind {
        FieldKind::Text => match raw {
            Value::String(value) => Ok(FieldValue::Text(value.clone())),
            Value::Number(value) => Ok(FieldValue::Text(value.to_string())),
            Value::Bool(value) => Ok(FieldValue::Text(value.to_string())),
            _ => Err(spec.invalid_error("expected text")),
        },
        FieldKind::Uuid => match raw {
            Value::String(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Ok(FieldValue::Text(String::new()));
                }
                Uuid::parse_str(trimmed)
                    .map(|uuid| FieldValue::Text(uuid.to_string()))
                    .map_err(|_| spec.invalid_error("expected a UUID"))
            }
            _ => Err(spec.invalid_error("expected a UUID")),
        },
        FieldKind::Integer => match raw {
            Value::Number(value) => value
                .as_i64()
                .or_else(|| value.as_f64().and_then(whole_i64))
                .map(FieldValue::Integer)
                .ok_or_else(|| spec.invalid_error("expected an integer")),
            Value::String(value) if value.trim().is_empty() => Ok(spec.default_value()),
            Value::String(value) => {
                let trimmed = value.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_i64))
                    .map(FieldValue::Integer)
                    .ok_or_else(|| spec.invalid_error("expected an integer"))
            }
            _ => Err(spec.invalid_error("expected an integer")),
        },
        FieldKind::Float => match raw {
            Value::Number(value) => value
                .as_f64()
                .filter(|f| f.is_finite())
                .map(FieldValue::Float)
                .ok_or_else(|| spec.invalid_error("expected a number")),
            Value::String(value) if value.trim().is_empty() => Ok(spec.default_value()),
            Value::String(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(FieldValue::Float)
                .ok_or_else(|| spec.invalid_error("expected a number")),
            _ => Err(spec.invalid_error("expected a number")),
        },
        FieldKind::Date => match raw {
            Value::String(value) => parse_date(value)
                .map(FieldValue::Date)
                .ok_or_else(|| spec.invalid_error("expected YYYY-MM-DD")),
            _ => Err(spec.invalid_error("expected YYYY-MM-DD")),
        },
        FieldKind::Bool => match raw {
            Value::Bool(value) => Ok(FieldValue::Bool(*value)),
            Value::Number(value) => Ok(FieldValue::Bool(value.as_f64().unwrap_or(0.0) != 0.0)),
            Value::String(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "y" => Ok(FieldValue::Bool(true)),
                "false" | "0" | "no" | "n" | "" => Ok(FieldValue::Bool(false)),
                _ => Err(spec.invalid_error("expected true or false")),
            },
            _ => Err(spec.invalid_error("expected true or false")),
        },
        FieldKind::StringList => match raw {
            Value::Array(items) => Ok(FieldValue::StringList(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(value) => Some(value.clone()),
                        Value::Null => None,
                        other => Some(other.to_string()),
                    })
                    .collect(),
            )),
            Value::String(value) => Ok(FieldValue::StringList(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            _ => Err(spec.invalid_error("expected a list")),
        },
    }
}

/// Truncate a finite float that fits in `i64`; `NaN`, `inf` and overflow are `None`.
pub(crate) fn whole_i64(value: f64) -> Option<i64> {
    let value = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    (value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64)
        .then_some(value as i64)
}

/// `""` is no date. Accepts `YYYY-MM-DD` and RFC 3339 timestamps.
fn parse_date(value: &str) -> Option<Option<NaiveDate>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(Some(date));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|datetime| Some(datetime.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CoreErrorKind;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::text("rocbnRegNo", "rocbn_reg_no", "ROCBN Reg. No").required(),
        FieldSpec::text("farmerName", "farmer_name", "farmer name").required(),
        FieldSpec::uuid("companyUUID", "company_uuid", "company"),
        FieldSpec::float("farmArea", "farm_area", "farm area"),
        FieldSpec::integer("headCount", "head_count", "head count"),
        FieldSpec::date("registeredDate", "registered_date", "registered date"),
        FieldSpec::text("unit", "unit", "unit").with_default(FieldDefault::Text("kg")),
        FieldSpec::list("tags", "tags", "tags"),
    ];

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_create_fills_defaults_and_drops_unknown_keys() {
        let input = object(json!({
            "rocbnRegNo": "RB-1",
            "farmerName": "Haji Ali",
            "id": "99",
            "uuid": "client-chosen",
            "createdBy": { "uuid": "x" },
        }));

        let payload = coerce(FIELDS, &input, CoerceMode::Create).unwrap();
        assert_eq!(payload.len(), FIELDS.len());
        assert_eq!(payload.get("farmArea"), Some(&FieldValue::Float(0.0)));
        assert_eq!(payload.get("headCount"), Some(&FieldValue::Integer(0)));
        assert_eq!(payload.get("registeredDate"), Some(&FieldValue::Date(None)));
        assert_eq!(payload.text("companyUUID"), Some(""));
        assert_eq!(payload.text("unit"), Some("kg"));
        assert!(payload.get("uuid").is_none());
        assert!(payload.get("id").is_none());
    }

    #[test]
    fn test_missing_required_field_message() {
        let input = object(json!({ "rocbnRegNo": "RB-1", "farmerName": "   " }));
        let err = coerce(FIELDS, &input, CoerceMode::Create).unwrap_err();
        assert_eq!(err.kind(), CoreErrorKind::Validation);
        assert_eq!(err.message(), "Please fill the farmer name fields");
    }

    #[test]
    fn test_update_writes_only_present_keys() {
        let input = object(json!({
            "rocbnRegNo": "RB-1",
            "farmerName": "Haji Ali",
            "farmArea": "2.75",
        }));

        let payload = coerce(FIELDS, &input, CoerceMode::Update).unwrap();
        assert_eq!(payload.len(), 3);
        assert_eq!(payload.get("farmArea"), Some(&FieldValue::Float(2.75)));
        assert!(payload.get("headCount").is_none());
    }

    #[test]
    fn test_update_still_requires_required_fields() {
        let input = object(json!({ "farmerName": "Haji Ali" }));
        let err = coerce(FIELDS, &input, CoerceMode::Update).unwrap_err();
        assert_eq!(err.message(), "Please fill the ROCBN Reg. No fields");
    }

    #[test]
    fn test_date_and_number_parsing() {
        let input = object(json!({
            "rocbnRegNo": "RB-1",
            "farmerName": "Haji Ali",
            "registeredDate": "2024-03-01T08:00:00.000Z",
            "headCount": 12.9,
            "tags": "padi, , sayur",
        }));
        let payload = coerce(FIELDS, &input, CoerceMode::Create).unwrap();
        assert_eq!(
            payload.get("registeredDate"),
            Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1)))
        );
        assert_eq!(payload.get("headCount"), Some(&FieldValue::Integer(12)));
        assert_eq!(
            payload.get("tags"),
            Some(&FieldValue::StringList(vec!["padi".into(), "sayur".into()]))
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let input = object(json!({
            "rocbnRegNo": "RB-1",
            "farmerName": "Haji Ali",
            "registeredDate": "01/03/2024",
        }));
        assert!(coerce(FIELDS, &input, CoerceMode::Create).is_err());

        let input = object(json!({
            "rocbnRegNo": "RB-1",
            "farmerName": "Haji Ali",
            "companyUUID": "not-a-uuid",
        }));
        let err = coerce(FIELDS, &input, CoerceMode::Create).unwrap_err();
        assert_eq!(err.message(), "Invalid company: expected a UUID");
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        for bad in ["NaN", "inf", "-infinity", "1e400"] {
            let input = object(json!({
                "rocbnRegNo": "RB-1",
                "farmerName": "Haji Ali",
                "farmArea": bad,
            }));
            let err = coerce(FIELDS, &input, CoerceMode::Create).unwrap_err();
            assert_eq!(err.kind(), CoreErrorKind::Validation, "{}", bad);
            assert_eq!(err.message(), "Invalid farm area: expected a number");
        }
    }

    #[test]
    fn test_integer_out_of_range_rejected() {
        for bad in [json!("1e30"), json!("NaN"), json!(1e30), json!("-9.3e18")] {
            let input = object(json!({
                "rocbnRegNo": "RB-1",
                "farmerName": "Haji Ali",
                "headCount": bad,
            }));
            let err = coerce(FIELDS, &input, CoerceMode::Create).unwrap_err();
            assert_eq!(err.message(), "Invalid head count: expected an integer");
        }

        let input = object(json!({
            "rocbnRegNo": "RB-1",
            "farmerName": "Haji Ali",
            "headCount": "12.9",
        }));
        let payload = coerce(FIELDS, &input, CoerceMode::Create).unwrap();
        assert_eq!(payload.get("headCount"), Some(&FieldValue::Integer(12)));
    }

    #[test]
    fn test_to_json_uses_external_names() {
        let input = object(json!({ "rocbnRegNo": "RB-1", "farmerName": "Haji Ali" }));
        let payload = coerce(FIELDS, &input, CoerceMode::Update).unwrap();
        assert_eq!(
            payload.to_json(),
            json!({ "rocbnRegNo": "RB-1", "farmerName": "Haji Ali" })
        );
    }
}
